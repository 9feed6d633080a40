// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bridge surface: method name + loose JSON argument bag -> `DialogRequest`,
// and `DialogResult` -> the JSON shape the calling app receives.
//
// Two rules govern parsing. Missing required content rejects the call before
// any UI exists. Everything cosmetic or per-entry (colors, sizes, single
// options, single rows, logos, unknown modes) degrades with a warning.

use serde_json::{Map, Value, json};
use tracing::warn;

use xdialog_core::error::{DialogError, Result};
use xdialog_core::options::{self, RawOption};
use xdialog_core::{
    AlertRequest, ConfirmRequest, DialogCommon, DialogKind, DialogRequest, DialogResult,
    DialogStyleOptions, LogoSource, MultiSelectRequest, PluginConfig, PresentationMode,
    PromptRequest, SheetRequest, SheetRow, SingleSelectRequest,
};

/// Read-only view over a call's argument object with lenient typed getters.
struct Args<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> Args<'a> {
    fn new(map: &'a Map<String, Value>) -> Self {
        Self { map }
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key).filter(|v| !v.is_null())
    }

    /// String field; other JSON types count as absent.
    fn str(&self, key: &str) -> Option<&'a str> {
        self.get(key).and_then(Value::as_str)
    }

    fn text(&self, key: &str) -> Option<String> {
        self.str(key).filter(|s| !s.is_empty()).map(str::to_owned)
    }

    fn required_text(&self, key: &'static str) -> Result<String> {
        match self.get(key) {
            None => Err(DialogError::MissingField { field: key }),
            Some(Value::String(s)) if s.is_empty() => Err(DialogError::MissingField { field: key }),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(_) => Err(DialogError::InvalidField {
                field: key,
                expected: "a string",
            }),
        }
    }

    /// Array field that must be present. An empty array is accepted.
    fn required_array(&self, key: &'static str) -> Result<&'a Vec<Value>> {
        match self.get(key) {
            None => Err(DialogError::MissingField { field: key }),
            Some(Value::Array(items)) => Ok(items),
            Some(_) => Err(DialogError::InvalidField {
                field: key,
                expected: "an array",
            }),
        }
    }

    /// Button label, falling back when absent or empty.
    fn label(&self, key: &str, fallback: &str) -> String {
        self.text(key).unwrap_or_else(|| fallback.to_owned())
    }

    fn flag(&self, key: &str) -> bool {
        self.get(key).and_then(Value::as_bool).unwrap_or(false)
    }

    fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }
}

/// Validate a call and build the request it describes.
pub fn parse_call(method: &str, args: &Value, config: &PluginConfig) -> Result<DialogRequest> {
    let kind = DialogKind::from_method_name(method)
        .ok_or_else(|| DialogError::UnknownMethod(method.to_owned()))?;
    let empty = Map::new();
    let map = match args {
        Value::Object(map) => map,
        Value::Null => &empty,
        _ => return Err(DialogError::InvalidArguments),
    };
    parse_request(kind, &Args::new(map), config)
}

fn parse_request(
    kind: DialogKind,
    args: &Args<'_>,
    config: &PluginConfig,
) -> Result<DialogRequest> {
    let labels = &config.labels;
    let common = DialogCommon {
        title: args.text("title"),
        mode: parse_mode(args, config.default_mode),
        style: parse_style(args),
    };

    let request = match kind {
        DialogKind::Alert => DialogRequest::Alert(AlertRequest {
            message: args.required_text("message")?,
            button_title: args.label("buttonTitle", &labels.ok),
            common,
        }),
        DialogKind::Confirm => DialogRequest::Confirm(ConfirmRequest {
            message: args.required_text("message")?,
            ok_button_title: args.label("okButtonTitle", &labels.ok),
            cancel_button_title: args.label("cancelButtonTitle", &labels.cancel),
            common,
        }),
        DialogKind::Prompt => DialogRequest::Prompt(PromptRequest {
            message: args.required_text("message")?,
            ok_button_title: args.label("okButtonTitle", &labels.ok),
            cancel_button_title: args.label("cancelButtonTitle", &labels.cancel),
            input_placeholder: args.text("inputPlaceholder"),
            input_text: args.str("inputText").map(str::to_owned),
            focus_input: args.flag("focusInput"),
            common,
        }),
        DialogKind::SingleSelect => {
            let message = args.required_text("message")?;
            DialogRequest::SingleSelect(SingleSelectRequest {
                message,
                options: parse_options(args)?,
                selected_value: args.str("selectedValue").map(str::to_owned),
                ok_button_title: args.label("okButtonTitle", &labels.ok),
                cancel_button_title: args.label("cancelButtonTitle", &labels.cancel),
                common,
            })
        }
        DialogKind::MultiSelect => {
            let message = args.required_text("message")?;
            let selected = args
                .get("selectedValues")
                .and_then(Value::as_array)
                .map(|values| {
                    values
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_owned)
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default();
            DialogRequest::MultiSelect(MultiSelectRequest {
                message,
                options: parse_options(args)?,
                selected_values: options::normalize_selection(selected),
                ok_button_title: args.label("okButtonTitle", &labels.ok),
                cancel_button_title: args.label("cancelButtonTitle", &labels.cancel),
                common,
            })
        }
        DialogKind::Sheet => {
            let title = args.required_text("title")?;
            let rows = parse_rows(args)?;
            DialogRequest::Sheet(SheetRequest {
                common: DialogCommon {
                    title: Some(title),
                    ..common
                },
                header_logo: args.str("headerLogo").and_then(|raw| parse_logo("headerLogo", raw)),
                rows,
                confirm_button_title: args.label("confirmButtonTitle", &labels.sheet_confirm),
                cancel_button_title: args.label("cancelButtonTitle", &labels.cancel),
            })
        }
    };
    Ok(request)
}

fn parse_mode(args: &Args<'_>, default: PresentationMode) -> PresentationMode {
    match args.str("mode") {
        None => default,
        Some(keyword) => PresentationMode::from_keyword(keyword).unwrap_or_else(|| {
            warn!(mode = keyword, fallback = default.keyword(), "unknown presentation mode");
            default
        }),
    }
}

/// Style hints may come flat on the call (the usual shape) or nested under
/// `style`. Flat keys win when both are given.
fn parse_style(args: &Args<'_>) -> DialogStyleOptions {
    let mut style = DialogStyleOptions::default();
    if let Some(nested) = args.get("style").and_then(Value::as_object) {
        apply_style(&Args::new(nested), &mut style);
    }
    apply_style(args, &mut style);
    style
}

fn apply_style(args: &Args<'_>, style: &mut DialogStyleOptions) {
    let colors = [
        ("buttonColor", &mut style.button_color),
        ("cancelButtonColor", &mut style.cancel_button_color),
        ("titleColor", &mut style.title_color),
        ("messageColor", &mut style.message_color),
        ("backgroundColor", &mut style.background_color),
    ];
    for (key, slot) in colors {
        if let Some(value) = args.str(key) {
            *slot = Some(value.to_owned());
        }
    }
    let numbers = [
        ("titleFontSize", &mut style.title_font_size),
        ("messageFontSize", &mut style.message_font_size),
        ("buttonFontSize", &mut style.button_font_size),
        ("contentButtonSpacing", &mut style.content_button_spacing),
    ];
    for (key, slot) in numbers {
        if let Some(value) = args.number(key) {
            *slot = Some(value);
        }
    }
}

fn parse_options(args: &Args<'_>) -> Result<Vec<xdialog_core::SelectOption>> {
    let raw = args.required_array("options")?;
    Ok(options::normalize(raw.iter().map(RawOption::from_json)))
}

fn parse_rows(args: &Args<'_>) -> Result<Vec<SheetRow>> {
    let raw = args.required_array("rows")?;
    let rows: Vec<SheetRow> = raw
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let Some(title) = entry.get("title").and_then(Value::as_str) else {
                warn!(index, "dropping sheet row without title");
                return None;
            };
            Some(SheetRow {
                title: title.to_owned(),
                logo: entry
                    .get("logo")
                    .and_then(Value::as_str)
                    .and_then(|raw| parse_logo("logo", raw)),
                value: entry.get("value").and_then(Value::as_str).map(str::to_owned),
            })
        })
        .collect();
    if rows.is_empty() {
        return Err(DialogError::MissingField { field: "rows" });
    }
    Ok(rows)
}

fn parse_logo(field: &str, raw: &str) -> Option<LogoSource> {
    if raw.trim().is_empty() {
        return None;
    }
    let logo = LogoSource::parse(raw);
    if logo.is_none() {
        warn!(field, "logo is neither a base64 data URL nor an http(s) URL, ignoring");
    }
    logo
}

/// Encode a result in the response shape of its method.
///
/// Alerts resolve with no payload, which is JSON `null`.
pub fn encode_result(result: &DialogResult) -> Value {
    match result {
        DialogResult::Alert => Value::Null,
        DialogResult::Confirm { confirmed } => json!({ "value": confirmed }),
        DialogResult::Prompt { text, cancelled } => {
            json!({ "value": text, "cancelled": cancelled })
        }
        DialogResult::SingleSelect { value, cancelled } => {
            json!({ "value": value, "cancelled": cancelled })
        }
        DialogResult::MultiSelect { values, cancelled } => {
            json!({ "values": values, "cancelled": cancelled })
        }
        DialogResult::Sheet { confirmed } => json!({ "confirmed": confirmed }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xdialog_core::SelectOption;

    fn parse(method: &str, args: Value) -> Result<DialogRequest> {
        parse_call(method, &args, &PluginConfig::default())
    }

    #[test]
    fn confirm_with_empty_message_rejects() {
        let err = parse("confirm", json!({ "message": "" })).unwrap_err();
        assert_eq!(err.to_string(), "message is required");
    }

    #[test]
    fn alert_without_message_rejects() {
        let err = parse("alert", json!({ "title": "Hi" })).unwrap_err();
        assert!(matches!(err, DialogError::MissingField { field: "message" }));
    }

    #[test]
    fn non_string_message_is_invalid() {
        let err = parse("alert", json!({ "message": 42 })).unwrap_err();
        assert!(matches!(err, DialogError::InvalidField { field: "message", .. }));
    }

    #[test]
    fn unknown_method_and_bad_arguments() {
        assert!(matches!(
            parse("toast", json!({})),
            Err(DialogError::UnknownMethod(name)) if name == "toast"
        ));
        assert!(matches!(
            parse("alert", json!(["message"])),
            Err(DialogError::InvalidArguments)
        ));
    }

    #[test]
    fn labels_default_per_kind() {
        let request = parse("confirm", json!({ "message": "Sure?" })).unwrap();
        let DialogRequest::Confirm(confirm) = request else {
            panic!("expected confirm");
        };
        assert_eq!(confirm.ok_button_title, "OK");
        assert_eq!(confirm.cancel_button_title, "Cancel");

        let sheet = parse(
            "sheet",
            json!({ "title": "Order", "rows": [{ "title": "Total", "value": "$9.99" }] }),
        )
        .unwrap();
        assert_eq!(sheet.button_labels().primary, "Confirm");
    }

    #[test]
    fn configured_labels_and_mode_apply() {
        let mut config = PluginConfig::default();
        config.labels.ok = "Vale".into();
        config.default_mode = PresentationMode::Fullscreen;
        let request = parse_call("alert", &json!({ "message": "Hola" }), &config).unwrap();
        assert_eq!(request.button_labels().primary, "Vale");
        assert_eq!(request.mode(), PresentationMode::Fullscreen);
    }

    #[test]
    fn unknown_mode_degrades_to_default() {
        let request = parse("alert", json!({ "message": "m", "mode": "sideways" })).unwrap();
        assert_eq!(request.mode(), PresentationMode::Basic);
    }

    #[test]
    fn malformed_option_is_dropped_not_rejected() {
        let request = parse(
            "singleSelect",
            json!({
                "message": "Pick",
                "options": [{ "label": "A" }, { "label": "B", "value": "b" }],
            }),
        )
        .unwrap();
        assert_eq!(request.options(), [SelectOption::new("B", "b")]);
    }

    #[test]
    fn select_without_options_rejects() {
        let err = parse("multiSelect", json!({ "message": "Pick" })).unwrap_err();
        assert_eq!(err.to_string(), "options is required");
        let err =
            parse("singleSelect", json!({ "message": "Pick", "options": "a,b" })).unwrap_err();
        assert_eq!(err.to_string(), "options must be an array");
    }

    #[test]
    fn empty_options_array_is_accepted() {
        let request = parse("multiSelect", json!({ "message": "Pick", "options": [] })).unwrap();
        assert!(request.options().is_empty());
    }

    #[test]
    fn malformed_color_does_not_reject() {
        let request = parse(
            "confirm",
            json!({ "message": "m", "buttonColor": "not-a-color", "titleFontSize": 18 }),
        )
        .unwrap();
        let style = &request.common().style;
        assert_eq!(style.button_color.as_deref(), Some("not-a-color"));
        assert_eq!(style.title_font_size, Some(18.0));
    }

    #[test]
    fn flat_style_keys_override_nested() {
        let request = parse(
            "alert",
            json!({
                "message": "m",
                "style": { "buttonColor": "#000000", "titleColor": "#111111" },
                "buttonColor": "#FF5722",
            }),
        )
        .unwrap();
        let style = &request.common().style;
        assert_eq!(style.button_color.as_deref(), Some("#FF5722"));
        assert_eq!(style.title_color.as_deref(), Some("#111111"));
    }

    #[test]
    fn multi_select_preselection_is_deduplicated() {
        let DialogRequest::MultiSelect(request) = parse(
            "multiSelect",
            json!({
                "message": "Toppings",
                "options": [{ "label": "Cheese", "value": "cheese" }],
                "selectedValues": ["cheese", 3, "cheese", "ham"],
            }),
        )
        .unwrap() else {
            panic!("expected multiSelect");
        };
        assert_eq!(request.selected_values, ["cheese", "ham"]);
    }

    #[test]
    fn sheet_requires_title_and_a_usable_row() {
        let err = parse("sheet", json!({ "rows": [{ "title": "Total" }] })).unwrap_err();
        assert_eq!(err.to_string(), "title is required");
        let err =
            parse("sheet", json!({ "title": "Order", "rows": [{ "value": "x" }] })).unwrap_err();
        assert_eq!(err.to_string(), "rows is required");
    }

    #[test]
    fn sheet_logos_degrade_individually() {
        let DialogRequest::Sheet(sheet) = parse(
            "sheet",
            json!({
                "title": "Order",
                "headerLogo": "ftp://nope",
                "rows": [
                    { "title": "Shop", "logo": "https://example.com/shop.png" },
                    { "title": "Broken", "logo": "data:image/png;base64,@@" },
                ],
            }),
        )
        .unwrap() else {
            panic!("expected sheet");
        };
        assert_eq!(sheet.header_logo, None);
        assert!(sheet.rows[0].logo.as_ref().is_some_and(LogoSource::is_remote));
        assert_eq!(sheet.rows[1].logo, None);
    }

    #[test]
    fn prompt_fields_are_read() {
        let DialogRequest::Prompt(prompt) = parse(
            "prompt",
            json!({
                "message": "Name?",
                "inputPlaceholder": "Ada",
                "inputText": "Gr",
                "focusInput": true,
            }),
        )
        .unwrap() else {
            panic!("expected prompt");
        };
        assert_eq!(prompt.input_placeholder.as_deref(), Some("Ada"));
        assert_eq!(prompt.input_text.as_deref(), Some("Gr"));
        assert!(prompt.focus_input);
    }

    #[test]
    fn results_encode_to_response_shapes() {
        assert_eq!(encode_result(&DialogResult::Alert), Value::Null);
        assert_eq!(
            encode_result(&DialogResult::Confirm { confirmed: true }),
            json!({ "value": true })
        );
        assert_eq!(
            encode_result(&DialogResult::cancelled(DialogKind::Prompt)),
            json!({ "value": "", "cancelled": true })
        );
        assert_eq!(
            encode_result(&DialogResult::cancelled(DialogKind::SingleSelect)),
            json!({ "value": null, "cancelled": true })
        );
        assert_eq!(
            encode_result(&DialogResult::MultiSelect {
                values: vec!["a".into()],
                cancelled: false
            }),
            json!({ "values": ["a"], "cancelled": false })
        );
        assert_eq!(
            encode_result(&DialogResult::Sheet { confirmed: false }),
            json!({ "confirmed": false })
        );
    }
}
