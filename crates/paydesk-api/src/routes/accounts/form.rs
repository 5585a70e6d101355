//! Account form, used by the create modal and the account edit page

use std::collections::HashMap;

use paydesk_core::{account, AccountPatch, NewAccount};

use crate::routes::forms::{field, input, modal, FormErrors};

/// Raw field values as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountForm {
    pub name: String,
    pub address: String,
    pub phone_number: String,
    pub bank_account_number: String,
}

impl AccountForm {
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        Self {
            name: field(params, "name"),
            address: field(params, "address"),
            phone_number: field(params, "phoneNumber"),
            bank_account_number: field(params, "bankAccountNumber"),
        }
    }

    pub fn from_model(model: &account::Model) -> Self {
        Self {
            name: model.name.clone(),
            address: model.address.clone(),
            phone_number: model.phone_number.clone(),
            bank_account_number: model
                .bank_account_number
                .map(|n| n.to_string())
                .unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<NewAccount, FormErrors> {
        let mut errors = FormErrors::new();
        errors.require("name", &self.name, "Name");
        errors.require("address", &self.address, "Address");
        errors.require("phoneNumber", &self.phone_number, "Phone number");

        let bank_account_number = if self.bank_account_number.is_empty() {
            None
        } else {
            match self.bank_account_number.parse::<i64>() {
                Ok(n) if n > 0 => Some(n),
                _ => {
                    errors.add(
                        "bankAccountNumber",
                        "Bank account number must be a positive integer",
                    );
                    None
                }
            }
        };

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(NewAccount {
            name: self.name.clone(),
            address: self.address.clone(),
            phone_number: self.phone_number.clone(),
            bank_account_number,
        })
    }
}

/// Full replacement patch; an empty bank account field clears it
pub fn patch_from(input: NewAccount) -> AccountPatch {
    AccountPatch {
        name: Some(input.name),
        address: Some(input.address),
        phone_number: Some(input.phone_number),
        bank_account_number: Some(input.bank_account_number),
    }
}

fn fields(form: &AccountForm, errors: &FormErrors) -> String {
    [
        input("name", "Name", "text", &form.name, true, errors.get("name")),
        input("address", "Address", "text", &form.address, true, errors.get("address")),
        input(
            "phoneNumber",
            "Phone number",
            "text",
            &form.phone_number,
            true,
            errors.get("phoneNumber"),
        ),
        input(
            "bankAccountNumber",
            "Bank account number",
            "number",
            &form.bank_account_number,
            false,
            errors.get("bankAccountNumber"),
        ),
    ]
    .concat()
}

/// Create form inside the modal
pub fn render_create_modal(form: &AccountForm, errors: &FormErrors) -> String {
    let body = format!(
        r##"<form hx-post='/admin/accounts' hx-target='#modal' hx-swap='innerHTML'>
    {}
    <div class='flex justify-end gap-2 mt-6'>
        <button type='button' onclick='closeModal()' class='px-4 py-2 border rounded-lg hover:bg-gray-50'>Cancel</button>
        <button type='submit' class='px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>Create</button>
    </div>
</form>"##,
        fields(form, errors)
    );
    modal("Create Account", &body)
}

/// Edit form on the account page; swaps itself on submit
pub fn render_edit_form(id: i32, form: &AccountForm, errors: &FormErrors) -> String {
    format!(
        r##"<form id='account-form' hx-post='/admin/accounts/{id}' hx-target='#account-form' hx-swap='outerHTML' class='bg-white border rounded-lg p-6'>
    {fields}
    <div class='flex justify-end mt-4'>
        <button type='submit' class='px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>Save</button>
    </div>
</form>"##,
        id = id,
        fields = fields(form, errors)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::forms::parse_form;

    #[test]
    fn test_validate_ok() {
        let form = AccountForm::from_params(&parse_form(
            "name=Ann&address=1+Main+St&phoneNumber=555&bankAccountNumber=12345678",
        ));
        let input = form.validate().unwrap();
        assert_eq!(input.address, "1 Main St");
        assert_eq!(input.bank_account_number, Some(12345678));
    }

    #[test]
    fn test_validate_reports_each_field() {
        let form = AccountForm::from_params(&parse_form("name=&bankAccountNumber=-4"));
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("name"), Some("Name is required"));
        assert_eq!(errors.get("address"), Some("Address is required"));
        assert_eq!(errors.get("phoneNumber"), Some("Phone number is required"));
        assert!(errors.get("bankAccountNumber").is_some());
    }

    #[test]
    fn test_edit_form_round_trips_model() {
        let model = account::Model {
            id: 4,
            name: "Ann".to_string(),
            address: "X".to_string(),
            phone_number: "1".to_string(),
            bank_account_number: None,
        };
        let form = AccountForm::from_model(&model);
        assert_eq!(form.bank_account_number, "");
        let html = render_edit_form(4, &form, &FormErrors::new());
        assert!(html.contains("hx-post='/admin/accounts/4'"));
        assert!(html.contains("value='Ann'"));

        let patch = patch_from(form.validate().unwrap());
        assert_eq!(patch.bank_account_number, Some(None));
    }
}
