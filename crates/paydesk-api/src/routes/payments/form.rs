//! Payment create form

use std::collections::HashMap;

use paydesk_core::{account, NewPayment};

use crate::routes::forms::{field, input, modal, select, textarea, FormErrors};

/// Raw field values as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentForm {
    pub account_id: String,
    pub amount: String,
    pub notes: String,
    pub recipient_name: String,
    pub recipient_bank_name: String,
    pub recipient_account_number: String,
}

impl PaymentForm {
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        Self {
            account_id: field(params, "accountId"),
            amount: field(params, "amount"),
            notes: field(params, "notes"),
            recipient_name: field(params, "recipientName"),
            recipient_bank_name: field(params, "recipientBankName"),
            recipient_account_number: field(params, "recipientAccountNumber"),
        }
    }

    /// Form bound to one account
    pub fn for_account(account_id: Option<i32>) -> Self {
        Self {
            account_id: account_id.map(|id| id.to_string()).unwrap_or_default(),
            ..Default::default()
        }
    }

    /// Check the fields, returning the owning account id and the payment
    pub fn validate(&self) -> Result<(i32, NewPayment), FormErrors> {
        let mut errors = FormErrors::new();

        let account_id = self.account_id.parse::<i32>().ok();
        if account_id.is_none() {
            errors.add("accountId", "Please select an account");
        }

        let amount = self.amount.parse::<f64>().ok().filter(|a| a.is_finite());
        match amount {
            None => errors.add("amount", "Amount must be a number"),
            Some(a) if a <= 0.0 => errors.add("amount", "Amount must be greater than 0"),
            Some(_) => {}
        }

        errors.require("recipientName", &self.recipient_name, "Recipient name");
        errors.require("recipientBankName", &self.recipient_bank_name, "Recipient bank name");
        errors.require(
            "recipientAccountNumber",
            &self.recipient_account_number,
            "Recipient account number",
        );

        match (account_id, amount) {
            (Some(account_id), Some(amount)) if errors.is_empty() => Ok((
                account_id,
                NewPayment {
                    amount,
                    notes: Some(self.notes.clone()).filter(|n| !n.is_empty()),
                    status: None,
                    recipient_name: self.recipient_name.clone(),
                    recipient_bank_name: self.recipient_bank_name.clone(),
                    recipient_account_number: self.recipient_account_number.clone(),
                },
            )),
            _ => Err(errors),
        }
    }
}

/// Create form inside the modal. `locked` keeps the account fixed.
pub fn render_create_modal(
    form: &PaymentForm,
    errors: &FormErrors,
    accounts: &[account::Model],
    locked: bool,
) -> String {
    let options: Vec<(String, String)> = accounts
        .iter()
        .map(|a| (a.id.to_string(), a.name.clone()))
        .collect();

    let fields = [
        select(
            "accountId",
            "Account",
            &options,
            &form.account_id,
            locked,
            errors.get("accountId"),
        ),
        input("amount", "Amount", "number", &form.amount, true, errors.get("amount")),
        input(
            "recipientName",
            "Recipient's name",
            "text",
            &form.recipient_name,
            true,
            errors.get("recipientName"),
        ),
        input(
            "recipientBankName",
            "Recipient's bank name",
            "text",
            &form.recipient_bank_name,
            true,
            errors.get("recipientBankName"),
        ),
        input(
            "recipientAccountNumber",
            "Recipient's account number",
            "text",
            &form.recipient_account_number,
            true,
            errors.get("recipientAccountNumber"),
        ),
        textarea("notes", "Notes", &form.notes, errors.get("notes")),
    ]
    .concat();

    let body = format!(
        r##"<form hx-post='/admin/payments' hx-target='#modal' hx-swap='innerHTML'>
    <input type='hidden' name='locked' value='{}'>
    {}
    <div class='flex justify-end gap-2 mt-6'>
        <button type='button' onclick='closeModal()' class='px-4 py-2 border rounded-lg hover:bg-gray-50'>Cancel</button>
        <button type='submit' class='px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>Create</button>
    </div>
</form>"##,
        locked, fields
    );
    modal("Create Payment", &body)
}
