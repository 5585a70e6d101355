//! Form helpers for the admin pages
//!
//! Forms post url-encoded bodies. A submission that fails field checks is
//! rendered again with the typed values and per-field messages, so the
//! draft survives until a save goes through.

use std::collections::HashMap;

use paydesk_utils::escape_html;

/// Decode an `application/x-www-form-urlencoded` body
pub fn parse_form(body: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();
    for pair in body.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let key = urlencoding::decode(&key.replace('+', " "))
            .map(|k| k.into_owned())
            .unwrap_or_default();
        let value = urlencoding::decode(&value.replace('+', " "))
            .map(|v| v.into_owned())
            .unwrap_or_default();
        params.insert(key, value);
    }
    params
}

/// Trimmed value of a form field, empty when missing
pub fn field(params: &HashMap<String, String>, name: &str) -> String {
    params
        .get(name)
        .map(|v| v.trim().to_string())
        .unwrap_or_default()
}

/// Per-field validation messages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    errors: HashMap<String, String>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: &str) {
        self.errors
            .entry(field.to_string())
            .or_insert_with(|| message.to_string());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Record a message when a required field is blank
    pub fn require(&mut self, field: &str, value: &str, label: &str) {
        if value.trim().is_empty() {
            self.add(field, &format!("{} is required", label));
        }
    }
}

fn error_text(error: Option<&str>) -> String {
    error
        .map(|e| format!("<p class='mt-1 text-sm text-red-600'>{}</p>", escape_html(e)))
        .unwrap_or_default()
}

fn border_class(error: Option<&str>) -> &'static str {
    if error.is_some() {
        "border-red-500"
    } else {
        "border-gray-300"
    }
}

/// Labelled `<input>` with its error line
pub fn input(
    name: &str,
    label: &str,
    input_type: &str,
    value: &str,
    required: bool,
    error: Option<&str>,
) -> String {
    let extra = match input_type {
        "number" => " step='any'",
        _ => "",
    };
    format!(
        r#"<div class='mb-4'>
    <label for='{name}' class='block text-sm font-medium text-gray-700 mb-1'>{label}{star}</label>
    <input type='{input_type}' id='{name}' name='{name}' value='{value}'{required}{extra} class='w-full px-3 py-2 border rounded-lg {border}'>
    {error}
</div>"#,
        name = name,
        label = label,
        star = if required { " *" } else { "" },
        input_type = input_type,
        value = escape_html(value),
        required = if required { " required" } else { "" },
        extra = extra,
        border = border_class(error),
        error = error_text(error),
    )
}

pub fn textarea(name: &str, label: &str, value: &str, error: Option<&str>) -> String {
    format!(
        r#"<div class='mb-4'>
    <label for='{name}' class='block text-sm font-medium text-gray-700 mb-1'>{label}</label>
    <textarea id='{name}' name='{name}' rows='3' class='w-full px-3 py-2 border rounded-lg {border}'>{value}</textarea>
    {error}
</div>"#,
        name = name,
        label = label,
        border = border_class(error),
        value = escape_html(value),
        error = error_text(error),
    )
}

/// Labelled `<select>`. A disabled select is paired with a hidden input
/// so its value is still submitted.
pub fn select(
    name: &str,
    label: &str,
    options: &[(String, String)],
    selected: &str,
    disabled: bool,
    error: Option<&str>,
) -> String {
    let mut option_html = String::from("<option value=''>Select...</option>");
    for (value, text) in options {
        let mark = if value == selected { " selected" } else { "" };
        option_html.push_str(&format!(
            "<option value='{}'{}>{}</option>",
            escape_html(value),
            mark,
            escape_html(text)
        ));
    }

    let (select_name, hidden) = if disabled {
        (
            format!("{}-display", name),
            format!(
                "<input type='hidden' name='{}' value='{}'>",
                name,
                escape_html(selected)
            ),
        )
    } else {
        (name.to_string(), String::new())
    };

    format!(
        r#"<div class='mb-4'>
    <label for='{name}' class='block text-sm font-medium text-gray-700 mb-1'>{label} *</label>
    <select id='{name}' name='{select_name}'{disabled} required class='w-full px-3 py-2 border rounded-lg {border}'>{options}</select>
    {hidden}
    {error}
</div>"#,
        name = name,
        label = label,
        select_name = select_name,
        disabled = if disabled { " disabled" } else { "" },
        border = border_class(error),
        options = option_html,
        hidden = hidden,
        error = error_text(error),
    )
}

/// Modal shell rendered into the layout's `#modal` slot. Clearing the
/// slot closes it.
pub fn modal(title: &str, body: &str) -> String {
    format!(
        r#"<div class='fixed inset-0 bg-black bg-opacity-40 flex items-center justify-center z-40'>
    <div class='bg-white rounded-lg shadow-xl w-full max-w-lg p-6'>
        <div class='flex items-center justify-between mb-4'>
            <h3 class='text-lg font-semibold'>{}</h3>
            <button type='button' onclick='closeModal()' class='text-gray-400 hover:text-gray-600'>&times;</button>
        </div>
        {}
    </div>
</div>"#,
        escape_html(title),
        body
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_form_decodes() {
        let params = parse_form("name=Ann+Lee&address=1%20Main%20St&empty=&flag");
        assert_eq!(params.get("name").unwrap(), "Ann Lee");
        assert_eq!(params.get("address").unwrap(), "1 Main St");
        assert_eq!(params.get("empty").unwrap(), "");
        assert_eq!(params.get("flag").unwrap(), "");
        assert_eq!(field(&params, "missing"), "");
    }

    #[test]
    fn test_form_errors_keep_first_message() {
        let mut errors = FormErrors::new();
        errors.require("name", "  ", "Name");
        errors.add("name", "other");
        assert_eq!(errors.get("name"), Some("Name is required"));
        errors.require("address", "here", "Address");
        assert_eq!(errors.get("address"), None);
        assert!(!errors.is_empty());
    }

    #[test]
    fn test_input_escapes_value_and_shows_error() {
        let html = input("name", "Name", "text", "<b>", true, Some("Name is required"));
        assert!(html.contains("value='&lt;b&gt;'"));
        assert!(html.contains(" required"));
        assert!(html.contains("Name is required"));
        assert!(html.contains("border-red-500"));
    }

    #[test]
    fn test_disabled_select_submits_hidden_value() {
        let options = vec![("3".to_string(), "Ann".to_string())];
        let html = select("accountId", "Account", &options, "3", true, None);
        assert!(html.contains("<option value='3' selected>Ann</option>"));
        assert!(html.contains("<input type='hidden' name='accountId' value='3'>"));
        assert!(html.contains("name='accountId-display'"));
    }
}
