//! Schema-driven edit form.
//!
//! One text input per top-level property of a [`FormDescriptor`].
//! Scalars are typed directly; arrays and objects are edited as JSON.
//! Submitting merges the inputs back over the original value, so
//! read-only and unlisted keys survive untouched.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};
use serde_json::{Map, Number, Value};

use edgectl_core::schema::{self, FieldKind};
use edgectl_core::{FieldError, FormDescriptor, FormField};

use crate::theme;

#[derive(Debug, PartialEq)]
pub enum FormEvent {
    Submitted(Value),
    Cancelled,
    Consumed,
}

#[derive(Debug, Clone)]
pub struct Form {
    descriptor: FormDescriptor,
    fields: Vec<FormField>,
    inputs: Vec<String>,
    base: Map<String, Value>,
    active: usize,
    errors: Vec<FieldError>,
}

impl Form {
    pub fn new(descriptor: FormDescriptor, value: &Value) -> Self {
        let fields = descriptor.fields();
        let base = value.as_object().cloned().unwrap_or_default();
        let inputs = fields
            .iter()
            .map(|f| base.get(&f.key).map(to_input).unwrap_or_default())
            .collect();
        let active = fields.iter().position(|f| !f.read_only).unwrap_or(0);
        Self {
            descriptor,
            fields,
            inputs,
            base,
            active,
            errors: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Mark a server-side rejection (or a failed conversion) on the form.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.errors = vec![FieldError {
            path: String::new(),
            message: message.into(),
        }];
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormEvent {
        match key.code {
            KeyCode::Esc => return FormEvent::Cancelled,
            KeyCode::Enter => {
                return match self.submit() {
                    Some(value) => FormEvent::Submitted(value),
                    None => FormEvent::Consumed,
                };
            }
            KeyCode::Tab | KeyCode::Down => self.step(true),
            KeyCode::BackTab | KeyCode::Up => self.step(false),
            KeyCode::Left => self.cycle_option(false),
            KeyCode::Right => self.cycle_option(true),
            KeyCode::Backspace => {
                if let Some(input) = self.active_input() {
                    input.pop();
                }
            }
            KeyCode::Char(' ') if self.active_kind() == Some(FieldKind::Boolean) => {
                if let Some(input) = self.active_input() {
                    let next = if input == "true" { "false" } else { "true" };
                    *input = next.to_owned();
                }
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                if let Some(input) = self.active_input() {
                    input.push(c);
                }
            }
            _ => {}
        }
        FormEvent::Consumed
    }

    fn active_kind(&self) -> Option<FieldKind> {
        self.fields.get(self.active).map(|f| f.kind)
    }

    fn active_input(&mut self) -> Option<&mut String> {
        let field = self.fields.get(self.active)?;
        if field.read_only {
            return None;
        }
        self.inputs.get_mut(self.active)
    }

    fn step(&mut self, forward: bool) {
        let len = self.fields.len();
        if len == 0 {
            return;
        }
        let mut next = self.active;
        for _ in 0..len {
            next = if forward {
                (next + 1) % len
            } else {
                (next + len - 1) % len
            };
            if self.fields.get(next).is_some_and(|f| !f.read_only) {
                self.active = next;
                return;
            }
        }
    }

    fn cycle_option(&mut self, forward: bool) {
        let Some(field) = self.fields.get(self.active) else {
            return;
        };
        if field.read_only || field.options.is_empty() {
            return;
        }
        let options = field.options.clone();
        let Some(input) = self.inputs.get_mut(self.active) else {
            return;
        };
        let len = options.len();
        let next = match options.iter().position(|o| o == input) {
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
            None => 0,
        };
        if let Some(option) = options.get(next) {
            input.clone_from(option);
        }
    }

    /// Convert the inputs and validate. Errors stay on the form.
    pub fn submit(&mut self) -> Option<Value> {
        match self.value() {
            Ok(value) => {
                self.errors = schema::validate(&self.descriptor, &value);
                self.errors.is_empty().then_some(value)
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }

    fn value(&self) -> Result<Value, Vec<FieldError>> {
        let mut out = self.base.clone();
        let mut errors = Vec::new();

        for (field, raw) in self.fields.iter().zip(&self.inputs) {
            if field.read_only {
                continue;
            }
            match from_input(field.kind, raw.trim()) {
                Ok(Some(value)) => {
                    out.insert(field.key.clone(), value);
                }
                Ok(None) => {
                    out.remove(&field.key);
                }
                Err(message) => errors.push(FieldError {
                    path: field.key.clone(),
                    message,
                }),
            }
        }

        if errors.is_empty() {
            Ok(Value::Object(out))
        } else {
            Err(errors)
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Clear, area);
        let block = Block::default()
            .title(format!(" {} ", self.descriptor.title()))
            .title_style(theme::title())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border(true));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = Vec::new();
        let mut active_line = 0;
        for (i, (field, input)) in self.fields.iter().zip(&self.inputs).enumerate() {
            let active = i == self.active;
            if active {
                active_line = lines.len();
            }
            let marker = if field.required { "*" } else { "" };
            let label_style = if active {
                theme::title()
            } else {
                theme::key_hint()
            };
            let mut value_style = if field.read_only {
                theme::key_hint()
            } else {
                theme::table_row()
            };
            if active {
                value_style = value_style.add_modifier(Modifier::BOLD);
            }

            let mut spans = vec![
                Span::styled(format!("{:>18}{marker:1} ", field.title), label_style),
                Span::styled(input.clone(), value_style),
            ];
            if active {
                spans.push(Span::styled("\u{2588}", theme::title()));
            }
            if !field.options.is_empty() && active {
                spans.push(Span::styled(
                    format!("  ←/→ {}", field.options.join("|")),
                    theme::key_hint(),
                ));
            }
            lines.push(Line::from(spans));
        }

        if !self.errors.is_empty() {
            lines.push(Line::from(""));
            for error in &self.errors {
                lines.push(Line::from(Span::styled(
                    format!("✗ {error}"),
                    theme::error_text(),
                )));
            }
        }
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Tab", theme::key_hint_key()),
            Span::styled(" next  ", theme::key_hint()),
            Span::styled("Enter", theme::key_hint_key()),
            Span::styled(" save  ", theme::key_hint()),
            Span::styled("Esc", theme::key_hint_key()),
            Span::styled(" cancel", theme::key_hint()),
        ]));

        let height = usize::from(inner.height.max(1));
        let offset = u16::try_from(active_line.saturating_sub(height - 1)).unwrap_or(0);
        frame.render_widget(Paragraph::new(lines).scroll((offset, 0)), inner);
    }
}

/// Text shown in an input for an existing value.
fn to_input(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Parse an input back into JSON. `Ok(None)` drops the key.
fn from_input(kind: FieldKind, raw: &str) -> Result<Option<Value>, String> {
    if raw.is_empty() {
        return Ok(match kind {
            FieldKind::String => Some(Value::String(String::new())),
            _ => None,
        });
    }
    let value = match kind {
        FieldKind::String => Value::String(raw.to_owned()),
        FieldKind::Integer => raw
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| "must be a whole number".to_owned())?,
        FieldKind::Number => match raw.parse::<i64>() {
            Ok(n) => Value::from(n),
            Err(_) => raw
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
                .ok_or_else(|| "must be a number".to_owned())?,
        },
        FieldKind::Boolean => match raw {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            _ => return Err("must be true or false".into()),
        },
        FieldKind::Array | FieldKind::Object => {
            let parsed: Value =
                serde_json::from_str(raw).map_err(|e| format!("invalid JSON: {e}"))?;
            let shape_ok = match kind {
                FieldKind::Array => parsed.is_array(),
                _ => parsed.is_object(),
            };
            if !shape_ok {
                return Err(format!("must be a JSON {kind}"));
            }
            parsed
        }
    };
    Ok(Some(value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn press(form: &mut Form, code: KeyCode) -> FormEvent {
        form.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(form: &mut Form, text: &str) {
        for c in text.chars() {
            press(form, KeyCode::Char(c));
        }
    }

    #[test]
    fn edits_merge_over_the_original_value() {
        let node = json!({ "id": "n1", "name": "edge-1", "location": "rack 3", "serial": "SN-1" });
        let mut form = Form::new(schema::node(), &node);

        // The read-only id is skipped; focus starts on name.
        type_text(&mut form, "b");
        let FormEvent::Submitted(value) = press(&mut form, KeyCode::Enter) else {
            panic!("expected submit");
        };
        assert_eq!(
            value,
            json!({ "id": "n1", "name": "edge-1b", "location": "rack 3", "serial": "SN-1" })
        );
    }

    #[test]
    fn empty_required_fields_block_submit() {
        let mut form = Form::new(schema::node_add(), &json!({}));
        type_text(&mut form, "edge-9");

        assert_eq!(press(&mut form, KeyCode::Enter), FormEvent::Consumed);
        let paths: Vec<&str> = form.errors().iter().map(|e| e.path.as_str()).collect();
        assert!(paths.contains(&"serial"), "{paths:?}");
        assert!(paths.contains(&"location"), "{paths:?}");
        assert!(!paths.contains(&"name"), "{paths:?}");
    }

    #[test]
    fn numbers_and_json_fields_convert() {
        let app = json!({
            "id": "a1", "type": "container", "name": "nginx", "version": "1",
            "vendor": "acme", "cores": 2, "memory": 512, "source": "docker.io/nginx",
            "ports": [{ "port": 80, "protocol": "tcp" }]
        });
        let form = Form::new(schema::app(), &app);
        let cores = form.fields.iter().position(|f| f.key == "cores").unwrap();
        let ports = form.fields.iter().position(|f| f.key == "ports").unwrap();
        assert_eq!(form.inputs[cores], "2");
        assert_eq!(form.inputs[ports], r#"[{"port":80,"protocol":"tcp"}]"#);

        let mut form = form;
        form.inputs[cores] = "4".into();
        form.inputs[ports] = "not json".into();
        assert_eq!(form.submit(), None);
        assert_eq!(form.errors()[0].path, "ports");

        form.inputs[ports] = "[]".into();
        let value = form.submit().unwrap();
        assert_eq!(value["cores"], json!(4));
        assert_eq!(value["ports"], json!([]));
    }

    #[test]
    fn out_of_range_number_is_a_schema_error() {
        let app = json!({
            "type": "container", "name": "nginx", "version": "1",
            "vendor": "acme", "cores": 2, "memory": 512, "source": "docker.io/nginx"
        });
        let mut form = Form::new(schema::app(), &app);
        let cores = form.fields.iter().position(|f| f.key == "cores").unwrap();
        form.inputs[cores] = "64".into();

        assert_eq!(form.submit(), None);
        assert!(form.errors().iter().any(|e| e.path == "cores"));
    }

    #[test]
    fn enum_fields_cycle_through_options() {
        let mut form = Form::new(schema::app(), &json!({ "type": "container" }));
        let kind = form.fields.iter().position(|f| f.key == "type").unwrap();
        form.active = kind;

        press(&mut form, KeyCode::Right);
        assert_eq!(form.inputs[kind], "vm");
        press(&mut form, KeyCode::Right);
        assert_eq!(form.inputs[kind], "container");
    }

    #[test]
    fn escape_cancels() {
        let mut form = Form::new(schema::node_add(), &json!({}));
        assert_eq!(press(&mut form, KeyCode::Esc), FormEvent::Cancelled);
    }
}
