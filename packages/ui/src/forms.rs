//! Small form controls shared by the dashboard dialogs.

use api::FileUpload;
use dioxus::prelude::*;

/// MIME type for a picked file when the browser does not report one.
pub fn guess_mime(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        _ => "application/octet-stream",
    }
}

async fn read_picked_file(evt: &FormEvent) -> Option<FileUpload> {
    let file = evt.files().into_iter().next()?;
    let file_name = file.name();
    let mime = file
        .content_type()
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| guess_mime(&file_name).to_string());
    match file.read_bytes().await {
        Ok(bytes) => Some(FileUpload {
            file_name,
            mime,
            bytes: bytes.to_vec(),
        }),
        Err(e) => {
            tracing::warn!(file = %file_name, "failed to read picked file: {}", e);
            None
        }
    }
}

#[component]
pub fn TextField(
    label: String,
    value: String,
    #[props(default = "text".to_string())] input_type: String,
    #[props(default)] placeholder: String,
    #[props(default)] required: bool,
    oninput: EventHandler<String>,
) -> Element {
    rsx! {
        label {
            class: "field",
            span { class: "field__label", "{label}" }
            input {
                class: "field__input",
                r#type: "{input_type}",
                placeholder: "{placeholder}",
                required: required,
                value: "{value}",
                oninput: move |evt: FormEvent| oninput.call(evt.value()),
            }
        }
    }
}

#[component]
pub fn TextAreaField(label: String, value: String, oninput: EventHandler<String>) -> Element {
    rsx! {
        label {
            class: "field",
            span { class: "field__label", "{label}" }
            textarea {
                class: "field__input",
                rows: 4,
                value: "{value}",
                oninput: move |evt: FormEvent| oninput.call(evt.value()),
            }
        }
    }
}

/// A `<select>` over `(value, label)` pairs. The empty value stands for
/// "nothing selected" and is shown only when `placeholder` is set.
#[component]
pub fn SelectField(
    label: String,
    value: String,
    options: Vec<(String, String)>,
    #[props(default)] placeholder: Option<String>,
    onchange: EventHandler<String>,
) -> Element {
    rsx! {
        label {
            class: "field",
            span { class: "field__label", "{label}" }
            select {
                class: "field__input",
                value: "{value}",
                onchange: move |evt: FormEvent| onchange.call(evt.value()),
                if let Some(placeholder) = placeholder {
                    option { value: "", selected: value.is_empty(), "{placeholder}" }
                }
                for (option_value, option_label) in options {
                    option {
                        key: "{option_value}",
                        value: "{option_value}",
                        selected: option_value == value,
                        "{option_label}"
                    }
                }
            }
        }
    }
}

/// File input that reads the picked file into memory.
#[component]
pub fn FileField(
    label: String,
    #[props(default)] accept: String,
    #[props(default)] hint: Option<String>,
    on_pick: EventHandler<Option<FileUpload>>,
) -> Element {
    rsx! {
        label {
            class: "field",
            span { class: "field__label", "{label}" }
            input {
                class: "field__input",
                r#type: "file",
                accept: "{accept}",
                onchange: move |evt: FormEvent| async move {
                    on_pick.call(read_picked_file(&evt).await);
                },
            }
            if let Some(hint) = hint {
                small { class: "field__hint", "{hint}" }
            }
        }
    }
}

/// Inline validation message under a form.
#[component]
pub fn FormError(message: Option<String>) -> Element {
    rsx! {
        if let Some(message) = message {
            p { class: "form-error", role: "alert", "{message}" }
        }
    }
}
