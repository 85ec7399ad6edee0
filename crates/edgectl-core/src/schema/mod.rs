// ── Schema-driven forms ──
//
// Each editable resource has a static descriptor: a JSON-Schema subset
// describing the wire shape plus a form layout. Front ends render fields
// from `fields()`; views run `validate()` before anything is sent.

mod descriptors;

use std::fmt;
use std::net::{IpAddr, Ipv4Addr};

use serde_json::{Map, Value};
use strum::{Display, EnumString};

pub use descriptors::{
    SchemaKind, app, app_policy, descriptor_for, dns_config_apply, interface, interface_policy,
    kube_ovn_policy, node, node_add, pfd_application, pfd_transaction, policy_for, subscription,
    traffic_policy, userplane,
};

/// A schema plus the form layout that renders it.
///
/// `form` is either `["*"]` (every property, declaration order) or an
/// explicit list of keys / `{ "key": ... }` objects.
#[derive(Debug, Clone, PartialEq)]
pub struct FormDescriptor {
    pub schema: Value,
    pub form: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum FieldKind {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
}

/// One top-level input of a rendered form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub key: String,
    pub title: String,
    pub kind: FieldKind,
    pub required: bool,
    pub read_only: bool,
    /// Allowed values when the schema declares an `enum`.
    pub options: Vec<String>,
}

impl FormDescriptor {
    pub fn new(schema: Value, form: Value) -> Self {
        Self { schema, form }
    }

    pub fn title(&self) -> &str {
        self.schema
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    fn properties(&self) -> Option<&Map<String, Value>> {
        self.schema.get("properties").and_then(Value::as_object)
    }

    /// Fields in render order. Unknown form keys are skipped.
    pub fn fields(&self) -> Vec<FormField> {
        let Some(props) = self.properties() else {
            return Vec::new();
        };
        let required = required_keys(&self.schema);

        let keys: Vec<String> = match self.form.as_array() {
            Some(entries) if entries.iter().any(|e| e.as_str() == Some("*")) => {
                props.keys().cloned().collect()
            }
            Some(entries) => {
                let mut keys: Vec<String> = Vec::new();
                for entry in entries {
                    let Some(key) = form_key(entry) else { continue };
                    if !keys.iter().any(|k| k == key) {
                        keys.push(key.to_owned());
                    }
                }
                keys
            }
            None => props.keys().cloned().collect(),
        };

        keys.into_iter()
            .filter_map(|key| {
                let prop = props.get(&key)?;
                Some(FormField {
                    title: prop
                        .get("title")
                        .and_then(Value::as_str)
                        .unwrap_or(&key)
                        .to_owned(),
                    kind: prop
                        .get("type")
                        .and_then(Value::as_str)
                        .and_then(|t| t.parse().ok())
                        .unwrap_or(FieldKind::String),
                    required: required.contains(&key.as_str()),
                    read_only: is_read_only(prop),
                    options: prop
                        .get("enum")
                        .and_then(Value::as_array)
                        .map(|values| values.iter().map(display_value).collect())
                        .unwrap_or_default(),
                    key,
                })
            })
            .collect()
    }
}

/// Top-level key a form entry refers to. `"a[].b"` and `"a.b"` both
/// resolve to `"a"`.
fn form_key(entry: &Value) -> Option<&str> {
    let raw = match entry {
        Value::String(s) => s.as_str(),
        Value::Object(o) => o.get("key")?.as_str()?,
        _ => return None,
    };
    raw.split(['[', '.']).next().filter(|k| !k.is_empty())
}

// ── Validation ──

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Dotted path, with `[i]` for array items. Empty for the root.
    pub path: String,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Check `value` against the descriptor's schema.
///
/// Supports `type`, `required`, `enum`, `minimum`/`maximum`,
/// `minLength`/`maxLength`, `minItems`/`maxItems`, `dependencies`, and
/// the `cidr`, `ipv4`, and `mac-address` formats. Read-only properties
/// are not checked. A required string that is empty counts as missing.
pub fn validate(descriptor: &FormDescriptor, value: &Value) -> Vec<FieldError> {
    let mut errors = Vec::new();
    check(&descriptor.schema, value, "", &mut errors);
    errors
}

fn check(schema: &Value, value: &Value, path: &str, errors: &mut Vec<FieldError>) {
    if is_read_only(schema) || value.is_null() {
        return;
    }
    let mut fail = |message: String| {
        errors.push(FieldError {
            path: path.to_owned(),
            message,
        });
    };

    if let Some(ty) = schema.get("type").and_then(Value::as_str) {
        if !type_matches(ty, value) {
            fail(format!("must be {}", article(ty)));
            return;
        }
    }

    if let Some(allowed) = schema.get("enum").and_then(Value::as_array) {
        if !allowed.contains(value) {
            let list: Vec<String> = allowed.iter().map(display_value).collect();
            fail(format!("must be one of {}", list.join(", ")));
        }
    }

    match value {
        Value::Number(n) => {
            let n = n.as_f64().unwrap_or_default();
            if let Some(min) = schema.get("minimum").and_then(Value::as_f64) {
                if n < min {
                    fail(format!("must be at least {min}"));
                }
            }
            if let Some(max) = schema.get("maximum").and_then(Value::as_f64) {
                if n > max {
                    fail(format!("must be at most {max}"));
                }
            }
        }
        Value::String(s) => {
            let len = count(s.chars().count());
            if let Some(min) = schema.get("minLength").and_then(Value::as_u64) {
                if len < min {
                    fail(format!("must be at least {min} characters"));
                }
            }
            if let Some(max) = schema.get("maxLength").and_then(Value::as_u64) {
                if len > max {
                    fail(format!("must be at most {max} characters"));
                }
            }
            if let Some(format) = schema.get("format").and_then(Value::as_str) {
                if !s.is_empty() && !format_matches(format, s) {
                    fail(format_message(format));
                }
            }
        }
        Value::Array(items) => {
            let len = count(items.len());
            if let Some(min) = schema.get("minItems").and_then(Value::as_u64) {
                if len < min {
                    fail(format!("needs at least {min} item(s)"));
                }
            }
            if let Some(max) = schema.get("maxItems").and_then(Value::as_u64) {
                if len > max {
                    fail(format!("allows at most {max} item(s)"));
                }
            }
            if let Some(item_schema) = schema.get("items") {
                for (i, item) in items.iter().enumerate() {
                    check(item_schema, item, &format!("{path}[{i}]"), errors);
                }
            }
        }
        Value::Object(obj) => check_object(schema, obj, path, errors),
        Value::Bool(_) | Value::Null => {}
    }
}

fn check_object(schema: &Value, obj: &Map<String, Value>, path: &str, errors: &mut Vec<FieldError>) {
    let child = |key: &str| {
        if path.is_empty() {
            key.to_owned()
        } else {
            format!("{path}.{key}")
        }
    };
    let props = schema.get("properties").and_then(Value::as_object);

    for key in required_keys(schema) {
        let read_only = props
            .and_then(|p| p.get(key))
            .is_some_and(is_read_only);
        if !read_only && !is_present(obj.get(key)) {
            errors.push(FieldError {
                path: child(key),
                message: "is required".into(),
            });
        }
    }

    if let Some(deps) = schema.get("dependencies").and_then(Value::as_object) {
        for (key, needs) in deps {
            if !is_present(obj.get(key)) {
                continue;
            }
            for need in needs.as_array().into_iter().flatten().filter_map(Value::as_str) {
                if !is_present(obj.get(need)) {
                    errors.push(FieldError {
                        path: child(need),
                        message: format!("is required when {key} is set"),
                    });
                }
            }
        }
    }

    if let Some(props) = props {
        for (key, prop) in props {
            if let Some(value) = obj.get(key) {
                check(prop, value, &child(key), errors);
            }
        }
    }
}

fn count(n: usize) -> u64 {
    u64::try_from(n).unwrap_or(u64::MAX)
}

fn required_keys(schema: &Value) -> Vec<&str> {
    schema
        .get("required")
        .and_then(Value::as_array)
        .map(|keys| keys.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}

fn is_read_only(schema: &Value) -> bool {
    ["readOnly", "readonly"]
        .iter()
        .any(|k| schema.get(*k).and_then(Value::as_bool).unwrap_or(false))
}

fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

fn type_matches(ty: &str, value: &Value) -> bool {
    match ty {
        "string" => value.is_string(),
        "number" => value.is_number(),
        "integer" => value.is_i64() || value.is_u64(),
        "boolean" => value.is_boolean(),
        "array" => value.is_array(),
        "object" => value.is_object(),
        _ => true,
    }
}

fn article(ty: &str) -> String {
    match ty {
        "array" | "object" | "integer" => format!("an {ty}"),
        _ => format!("a {ty}"),
    }
}

fn display_value(value: &Value) -> String {
    value
        .as_str()
        .map_or_else(|| value.to_string(), str::to_owned)
}

fn format_matches(format: &str, s: &str) -> bool {
    match format {
        "ipv4" => s.parse::<Ipv4Addr>().is_ok(),
        "cidr" => is_cidr(s),
        "mac-address" => is_mac(s),
        _ => true,
    }
}

fn format_message(format: &str) -> String {
    match format {
        "ipv4" => "must be an IPv4 address".into(),
        "cidr" => "must be an IP in CIDR notation".into(),
        "mac-address" => "must be a MAC address".into(),
        other => format!("must match format {other}"),
    }
}

fn is_cidr(s: &str) -> bool {
    let Some((addr, prefix)) = s.split_once('/') else {
        return false;
    };
    let Ok(prefix) = prefix.parse::<u8>() else {
        return false;
    };
    match addr.parse::<IpAddr>() {
        Ok(IpAddr::V4(_)) => prefix <= 32,
        Ok(IpAddr::V6(_)) => prefix <= 128,
        Err(_) => false,
    }
}

fn is_mac(s: &str) -> bool {
    let groups: Vec<&str> = s.split([':', '-']).collect();
    groups.len() == 6
        && groups
            .iter()
            .all(|g| g.len() == 2 && g.chars().all(|c| c.is_ascii_hexdigit()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn paths(errors: &[FieldError]) -> Vec<&str> {
        errors.iter().map(|e| e.path.as_str()).collect()
    }

    #[test]
    fn app_cores_and_memory_out_of_range() {
        let value = json!({
            "type": "container", "name": "n", "version": "1", "vendor": "v",
            "cores": 9, "memory": 0, "source": "http://x"
        });
        let errors = validate(&app(), &value);
        assert_eq!(paths(&errors), vec!["cores", "memory"]);
        assert_eq!(errors[0].to_string(), "cores: must be at most 8");
    }

    #[test]
    fn app_type_outside_enum() {
        let value = json!({
            "type": "vnf", "name": "n", "version": "1", "vendor": "v",
            "cores": 1, "memory": 128, "source": "http://x"
        });
        let errors = validate(&app(), &value);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "must be one of container, vm");
    }

    #[test]
    fn node_missing_serial() {
        let errors = validate(&node(), &json!({"name": "n", "location": "lab", "serial": ""}));
        assert_eq!(paths(&errors), vec!["serial"]);
        assert_eq!(errors[0].message, "is required");
    }

    #[test]
    fn read_only_fields_are_not_checked() {
        let errors = validate(
            &interface(),
            &json!({"id": "x", "driver": "kernel", "type": "none", "vlan": "not a number"}),
        );
        assert!(errors.is_empty(), "{errors:?}");
    }

    #[test]
    fn kube_ovn_cidr_and_dependencies() {
        let value = json!({
            "name": "p",
            "ingress_rules": [{
                "from": [{"cidr": "10.0.0.0/33"}],
                "ports": [{"port": 80}]
            }]
        });
        let errors = validate(&kube_ovn_policy(), &value);
        assert_eq!(
            paths(&errors),
            vec!["ingress_rules[0].from[0].cidr", "ingress_rules[0].ports[0].protocol"]
        );
    }

    #[test]
    fn formats() {
        assert!(is_cidr("192.168.1.0/24"));
        assert!(is_cidr("fd00::/64"));
        assert!(!is_cidr("192.168.1.0"));
        assert!(is_mac("aa:bb:cc:dd:ee:ff"));
        assert!(is_mac("AA-BB-CC-DD-EE-FF"));
        assert!(!is_mac("aa:bb:cc:dd:ee"));
    }

    #[test]
    fn star_form_follows_declaration_order() {
        let keys: Vec<String> = node().fields().into_iter().map(|f| f.key).collect();
        assert_eq!(keys, vec!["id", "name", "location", "serial"]);

        let id = &node().fields()[0];
        assert!(id.read_only);
        assert!(!id.required);
    }

    #[test]
    fn explicit_form_keys_resolve_to_top_level() {
        let fields = subscription().fields();
        assert_eq!(fields[0].key, "afServiceId");
        assert!(fields.iter().any(|f| f.key == "trafficFilters"));
        assert_eq!(
            fields.iter().filter(|f| f.key == "trafficFilters").count(),
            1
        );
    }

    #[test]
    fn enum_options_are_exposed() {
        let field = interface()
            .fields()
            .into_iter()
            .find(|f| f.key == "driver")
            .unwrap();
        assert_eq!(field.options, vec!["kernel", "userspace"]);
    }
}
