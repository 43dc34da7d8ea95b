//! Field-level JSX and expression snippets shared by the component renderers.
//!
//! Everything here works on one [`ClassifiedField`] and a caller-chosen state
//! variable, so Add, Edit and the bulk editors render identical inputs.

use crate::codegen::field_types::{ClassifiedField, SemanticType, ValidatorKind, WidgetKind};
use crate::codegen::utils::{escape_jsx_text, to_label, ts_member, ts_property_key, ts_string};
use std::fmt::{self, Write};

pub const INPUT_CLASS: &str = "w-full rounded border border-gray-300 px-3 py-2 text-sm";
pub const LABEL_CLASS: &str = "mb-1 block text-sm font-medium text-gray-700";
pub const BUTTON_CLASS: &str = "rounded bg-blue-600 px-4 py-2 text-sm text-white hover:bg-blue-700 disabled:opacity-50";
pub const SECONDARY_BUTTON_CLASS: &str = "rounded border border-gray-300 px-4 py-2 text-sm hover:bg-gray-50";
pub const DANGER_BUTTON_CLASS: &str = "rounded bg-red-600 px-4 py-2 text-sm text-white hover:bg-red-700 disabled:opacity-50";

/// Human label of a field as shown in forms and table headers
pub fn label(field: &ClassifiedField) -> String {
    escape_jsx_text(&to_label(field.name()))
}

/// DOM id of a field's input, unique per form via `prefix`
pub fn input_id(prefix: &str, field: &ClassifiedField) -> String {
    format!("{}-{}", prefix, field.local_key)
}

/// `id` attribute of a generated input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputId {
    /// `id="add-Title"`
    Literal(String),
    /// Inside `rows.map((row, index) => ...)`: ``id={`bulk-edit-Title-${index}`}``
    PerRow(String),
}

impl InputId {
    pub fn literal(prefix: &str, field: &ClassifiedField) -> Self {
        InputId::Literal(input_id(prefix, field))
    }

    pub fn per_row(prefix: &str, field: &ClassifiedField) -> Self {
        InputId::PerRow(input_id(prefix, field))
    }
}

impl fmt::Display for InputId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputId::Literal(id) => write!(f, "\"{}\"", id),
            InputId::PerRow(id) => write!(f, "{{`{}-${{index}}`}}", id),
        }
    }
}

/// Array literal of a field's options: `['draft', 'published']`
pub fn options_literal(field: &ClassifiedField) -> String {
    let items: Vec<String> = field.options().iter().map(|o| ts_string(o)).collect();
    format!("[{}]", items.join(", "))
}

/// Expression that updates `state` with a new value for `field`:
/// `setter({ ...state, title: value })`
pub fn set_field(setter: &str, state: &str, field: &ClassifiedField, value: &str) -> String {
    format!(
        "{}({{ ...{}, {}: {} }})",
        setter,
        state,
        ts_property_key(field.name()),
        value
    )
}

/// Write a labelled input for `field` bound to `state`/`setter`
pub fn write_field_input(
    out: &mut String,
    field: &ClassifiedField,
    state: &str,
    setter: &str,
    id_prefix: &str,
    indent: usize,
) -> fmt::Result {
    let pad = " ".repeat(indent);
    let id = input_id(id_prefix, field);
    let value = ts_member(state, field.name());
    let required = if field.class.required { " *" } else { "" };

    writeln!(out, "{}<div className=\"mb-4\">", pad)?;
    writeln!(
        out,
        "{}  <label htmlFor=\"{}\" className=\"{}\">{}{}</label>",
        pad,
        id,
        LABEL_CLASS,
        label(field),
        required
    )?;
    write_bare_input(
        out,
        field,
        &value,
        |v| set_field(setter, state, field, v),
        &InputId::Literal(id),
        indent + 2,
    )?;
    writeln!(out, "{}</div>", pad)?;
    Ok(())
}

/// Write the input element alone. `on_change` receives the TS expression of
/// the new value and returns the statement that stores it.
pub fn write_bare_input<F>(
    out: &mut String,
    field: &ClassifiedField,
    value: &str,
    on_change: F,
    id: &InputId,
    indent: usize,
) -> fmt::Result
where
    F: Fn(&str) -> String,
{
    let pad = " ".repeat(indent);
    let widget = field.widget();

    if let Some(component) = widget.widget_component() {
        let options = if widget.uses_options() {
            format!(" options={{{}}}", options_literal(field))
        } else {
            String::new()
        };
        writeln!(
            out,
            "{}<{} id={} value={{{}}}{} onChange={{(value) => {}}} />",
            pad,
            component,
            id,
            value,
            options,
            on_change("value")
        )?;
        return Ok(());
    }

    match widget {
        WidgetKind::Textarea => writeln!(
            out,
            "{}<textarea id={} rows={{4}} className=\"{}\" value={{{}}} onChange={{(e) => {}}} />",
            pad,
            id,
            INPUT_CLASS,
            value,
            on_change("e.target.value")
        ),
        WidgetKind::Boolean | WidgetKind::Checkbox => writeln!(
            out,
            "{}<input id={} type=\"checkbox\" className=\"h-4 w-4\" checked={{Boolean({})}} onChange={{(e) => {}}} />",
            pad,
            id,
            value,
            on_change("e.target.checked")
        ),
        WidgetKind::Integer => writeln!(
            out,
            "{}<input id={} type=\"number\" step=\"1\" className=\"{}\" value={{{}}} onChange={{(e) => {}}} />",
            pad,
            id,
            INPUT_CLASS,
            value,
            on_change("parseInt(e.target.value || '0', 10)")
        ),
        WidgetKind::Float => writeln!(
            out,
            "{}<input id={} type=\"number\" step=\"any\" className=\"{}\" value={{{}}} onChange={{(e) => {}}} />",
            pad,
            id,
            INPUT_CLASS,
            value,
            on_change("parseFloat(e.target.value || '0')")
        ),
        _ => writeln!(
            out,
            "{}<input id={} type=\"{}\" className=\"{}\" value={{{}}} onChange={{(e) => {}}} />",
            pad,
            id,
            widget.input_type(),
            INPUT_CLASS,
            value,
            on_change("e.target.value")
        ),
    }
}

/// TS expression rendering a field of `object` as display text
pub fn display_expr(field: &ClassifiedField, object: &str) -> String {
    let value = ts_member(object, field.name());
    match field.widget() {
        WidgetKind::RichText => format!("String({} ?? '').replace(/<[^>]*>/g, '')", value),
        WidgetKind::Boolean | WidgetKind::Checkbox => format!("({} ? 'Yes' : 'No')", value),
        WidgetKind::Date => format!("({v} ? new Date({v}).toLocaleDateString() : '')", v = value),
        WidgetKind::DateRange => format!(
            "({v} ? `${{new Date({v}.start).toLocaleDateString()}} - ${{new Date({v}.end).toLocaleDateString()}}` : '')",
            v = value
        ),
        WidgetKind::TimeRange => format!("({v} ? `${{{v}.start}} - ${{{v}.end}}` : '')", v = value),
        WidgetKind::Image => value,
        _ if field.class.semantic_type() == SemanticType::StringList => {
            format!("({} ?? []).join(', ')", value)
        }
        _ => format!("String({} ?? '')", value),
    }
}

/// Write the checks of one field into a validation function body.
/// The generated code pushes messages onto an `errors` array.
pub fn write_validation(out: &mut String, field: &ClassifiedField, item: &str) -> fmt::Result {
    let value = ts_member(item, field.name());
    let label = to_label(field.name());
    let semantic = field.class.semantic_type();

    if field.class.required {
        let missing = match semantic {
            SemanticType::Integer | SemanticType::Float => {
                format!("{v} === undefined || {v} === null || Number.isNaN(Number({v}))", v = value)
            }
            SemanticType::Boolean => format!("{} === undefined", value),
            SemanticType::StringList => format!("!{v} || {v}.length === 0", v = value),
            SemanticType::DateRange | SemanticType::TimeRange => {
                format!("!{v} || !{v}.start || !{v}.end", v = value)
            }
            _ => format!("!{}", value),
        };
        writeln!(
            out,
            "  if ({}) errors.push({});",
            missing,
            ts_string(&format!("{} is required", label))
        )?;
    }

    let check = match &field.class.validator {
        ValidatorKind::None | ValidatorKind::NonEmptyList => None,
        ValidatorKind::Email => Some(format!(
            "{v} && !/^[^\\s@]+@[^\\s@]+\\.[^\\s@]+$/.test(String({v}))",
            v = value
        )),
        ValidatorKind::Url => Some(format!("{v} && !/^https?:\\/\\/\\S+$/.test(String({v}))", v = value)),
        ValidatorKind::Phone => Some(format!(
            "{v} && !/^\\+?[0-9\\s()-]{{6,20}}$/.test(String({v}))",
            v = value
        )),
        ValidatorKind::Integer => Some(format!("!Number.isInteger(Number({}))", value)),
        ValidatorKind::Number => Some(format!("Number.isNaN(Number({}))", value)),
        ValidatorKind::Date => Some(match semantic {
            SemanticType::DateRange => format!(
                "{v} && (Number.isNaN(new Date({v}.start).getTime()) || Number.isNaN(new Date({v}.end).getTime()))",
                v = value
            ),
            _ => format!("{v} && Number.isNaN(new Date({v}).getTime())", v = value),
        }),
        ValidatorKind::Time => Some(match semantic {
            SemanticType::TimeRange => format!(
                "{v} && (!/^\\d{{2}}:\\d{{2}}$/.test({v}.start) || !/^\\d{{2}}:\\d{{2}}$/.test({v}.end))",
                v = value
            ),
            _ => format!("{v} && !/^\\d{{2}}:\\d{{2}}$/.test(String({v}))", v = value),
        }),
        ValidatorKind::OneOf(options) => {
            let items: Vec<String> = options.iter().map(|o| ts_string(o)).collect();
            Some(format!("{v} && ![{o}].includes({v})", v = value, o = items.join(", ")))
        }
    };

    if let Some(check) = check {
        let message = match &field.class.validator {
            ValidatorKind::OneOf(_) => format!("{} must be one of the allowed options", label),
            ValidatorKind::Integer => format!("{} must be a whole number", label),
            ValidatorKind::Number => format!("{} must be a number", label),
            _ => format!("{} is not valid", label),
        };
        writeln!(out, "  if ({}) errors.push({});", check, ts_string(&message))?;
    }

    Ok(())
}

/// Import lines for the dedicated widget components used by the schema,
/// relative to the `components/` directory
pub fn write_widget_imports(out: &mut String, components: &[(WidgetKind, &'static str)]) -> fmt::Result {
    for (_, component) in components {
        writeln!(out, "import {} from './others-field-type/{}';", component, component)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::field_types::classify_fields;
    use crate::codegen::types::FieldSpec;

    fn field(spec: FieldSpec) -> ClassifiedField {
        let (mut classified, _) = classify_fields(&[spec]);
        classified.remove(0)
    }

    #[test]
    fn test_text_input() {
        let mut out = String::new();
        write_field_input(&mut out, &field(FieldSpec::new("title", "STRING")), "newItem", "setNewItem", "add", 0)
            .unwrap();
        assert!(out.contains("type=\"text\""));
        assert!(out.contains("value={newItem.title}"));
        assert!(out.contains("setNewItem({ ...newItem, title: e.target.value })"));
        assert!(out.contains(">Title</label>"));
    }

    #[test]
    fn test_select_uses_widget_component() {
        let mut out = String::new();
        let f = field(FieldSpec::new("status", "SELECT").with_options(["draft", "live"]));
        write_field_input(&mut out, &f, "item", "setItem", "edit", 2).unwrap();
        assert!(out.contains("<SelectField id=\"edit-Status\""));
        assert!(out.contains("options={['draft', 'live']}"));
    }

    #[test]
    fn test_quoted_field_name() {
        let mut out = String::new();
        write_field_input(&mut out, &field(FieldSpec::new("first name", "STRING")), "s", "set", "add", 0).unwrap();
        assert!(out.contains("value={s['first name']}"));
        assert!(out.contains("'first name': e.target.value"));
    }

    #[test]
    fn test_required_validation() {
        let mut out = String::new();
        write_validation(&mut out, &field(FieldSpec::new("title", "STRING").required()), "item").unwrap();
        assert_eq!(out, "  if (!item.title) errors.push('Title is required');\n");
    }

    #[test]
    fn test_phone_validation_regex_braces() {
        let mut out = String::new();
        write_validation(&mut out, &field(FieldSpec::new("phone", "PHONENUMBER")), "item").unwrap();
        assert!(out.contains("{6,20}"));
    }

    #[test]
    fn test_display_expr() {
        assert_eq!(
            display_expr(&field(FieldSpec::new("tags", "STRINGARRAY")), "row"),
            "(row.tags ?? []).join(', ')"
        );
        assert_eq!(
            display_expr(&field(FieldSpec::new("featured", "BOOLEAN")), "row"),
            "(row.featured ? 'Yes' : 'No')"
        );
    }

    #[test]
    fn test_per_row_id_is_template_literal() {
        let mut out = String::new();
        let f = field(FieldSpec::new("title", "STRING"));
        write_bare_input(&mut out, &f, "row.title", |v| format!("update({})", v), &InputId::per_row("bulk-edit", &f), 0)
            .unwrap();
        assert!(out.starts_with("<input id={`bulk-edit-Title-${index}`} type=\"text\""));
    }

    #[test]
    fn test_colliding_names_get_distinct_ids() {
        let (fields, _) = classify_fields(&[FieldSpec::new("first name", "STRING"), FieldSpec::new("first_name", "STRING")]);
        let mut out = String::new();
        for f in &fields {
            write_field_input(&mut out, f, "item", "setItem", "add", 0).unwrap();
        }
        assert!(out.contains("htmlFor=\"add-FirstName\""));
        assert!(out.contains("<input id=\"add-FirstName2\""));
        assert!(out.contains("htmlFor=\"add-FirstName2\""));
    }
}
