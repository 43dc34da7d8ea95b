//! Field type classifier.
//!
//! Maps the raw type tag of a [`FieldSpec`] to the widget used to edit it, the
//! default value of a new record and the validator applied on submit. Unknown
//! tags degrade to the plain text widget.

use crate::codegen::types::{FieldSpec, GenerationWarning};
use crate::codegen::utils::ts_local_suffix;
use serde::Serialize;
use std::collections::HashSet;

/// UI widget used to edit and display a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum WidgetKind {
    Text,
    Email,
    Url,
    Phone,
    Password,
    Integer,
    Float,
    Boolean,
    Checkbox,
    Date,
    Time,
    DateRange,
    TimeRange,
    Color,
    Textarea,
    RichText,
    Select,
    Radio,
    Autocomplete,
    DynamicSelect,
    MultiSelect,
    MultiCheckbox,
    StringArray,
    Image,
    Images,
}

impl WidgetKind {
    /// Every widget kind, in table order
    pub const ALL: [WidgetKind; 25] = [
        WidgetKind::Text,
        WidgetKind::Email,
        WidgetKind::Url,
        WidgetKind::Phone,
        WidgetKind::Password,
        WidgetKind::Integer,
        WidgetKind::Float,
        WidgetKind::Boolean,
        WidgetKind::Checkbox,
        WidgetKind::Date,
        WidgetKind::Time,
        WidgetKind::DateRange,
        WidgetKind::TimeRange,
        WidgetKind::Color,
        WidgetKind::Textarea,
        WidgetKind::RichText,
        WidgetKind::Select,
        WidgetKind::Radio,
        WidgetKind::Autocomplete,
        WidgetKind::DynamicSelect,
        WidgetKind::MultiSelect,
        WidgetKind::MultiCheckbox,
        WidgetKind::StringArray,
        WidgetKind::Image,
        WidgetKind::Images,
    ];

    /// Semantic type of values edited by this widget
    pub fn semantic_type(self) -> SemanticType {
        match self {
            WidgetKind::Integer => SemanticType::Integer,
            WidgetKind::Float => SemanticType::Float,
            WidgetKind::Boolean | WidgetKind::Checkbox => SemanticType::Boolean,
            WidgetKind::Date => SemanticType::Date,
            WidgetKind::Time => SemanticType::Time,
            WidgetKind::DateRange => SemanticType::DateRange,
            WidgetKind::TimeRange => SemanticType::TimeRange,
            WidgetKind::MultiSelect
            | WidgetKind::MultiCheckbox
            | WidgetKind::StringArray
            | WidgetKind::Images => SemanticType::StringList,
            _ => SemanticType::String,
        }
    }

    /// Component name of the dedicated widget file under `others-field-type/`,
    /// `None` when a plain input element is enough
    pub fn widget_component(self) -> Option<&'static str> {
        match self {
            WidgetKind::Select => Some("SelectField"),
            WidgetKind::Radio => Some("RadioButtonField"),
            WidgetKind::Autocomplete => Some("AutocompleteField"),
            WidgetKind::DynamicSelect => Some("DynamicSelectField"),
            WidgetKind::MultiSelect => Some("MultiSelectField"),
            WidgetKind::MultiCheckbox => Some("MultiCheckboxField"),
            WidgetKind::StringArray => Some("StringArrayField"),
            WidgetKind::RichText => Some("RichTextField"),
            WidgetKind::Date => Some("DateField"),
            WidgetKind::Time => Some("TimeField"),
            WidgetKind::DateRange => Some("DateRangeField"),
            WidgetKind::TimeRange => Some("TimeRangeField"),
            WidgetKind::Color => Some("ColorPickerField"),
            WidgetKind::Image => Some("ImageUploadField"),
            WidgetKind::Images => Some("ImagesUploadField"),
            _ => None,
        }
    }

    /// `type` attribute for widgets rendered as a plain `<input>`
    pub fn input_type(self) -> &'static str {
        match self {
            WidgetKind::Email => "email",
            WidgetKind::Url => "url",
            WidgetKind::Phone => "tel",
            WidgetKind::Password => "password",
            WidgetKind::Integer | WidgetKind::Float => "number",
            WidgetKind::Boolean | WidgetKind::Checkbox => "checkbox",
            _ => "text",
        }
    }

    /// Whether the widget picks from a fixed option list
    pub fn uses_options(self) -> bool {
        matches!(
            self,
            WidgetKind::Select
                | WidgetKind::Radio
                | WidgetKind::Autocomplete
                | WidgetKind::DynamicSelect
                | WidgetKind::MultiSelect
                | WidgetKind::MultiCheckbox
        )
    }

    /// Whether a free-text search may match against this field
    pub fn is_searchable(self) -> bool {
        matches!(
            self,
            WidgetKind::Text
                | WidgetKind::Email
                | WidgetKind::Url
                | WidgetKind::Phone
                | WidgetKind::Textarea
                | WidgetKind::Select
                | WidgetKind::Radio
                | WidgetKind::Autocomplete
                | WidgetKind::DynamicSelect
        )
    }
}

/// Value type stored for a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SemanticType {
    String,
    Integer,
    Float,
    Boolean,
    Date,
    Time,
    DateRange,
    TimeRange,
    StringList,
}

impl SemanticType {
    /// TypeScript type of the field in the entity interface
    pub fn ts_type(self) -> &'static str {
        match self {
            SemanticType::String | SemanticType::Time => "string",
            SemanticType::Integer | SemanticType::Float => "number",
            SemanticType::Boolean => "boolean",
            SemanticType::Date => "Date",
            SemanticType::DateRange => "{ start: Date; end: Date }",
            SemanticType::TimeRange => "{ start: string; end: string }",
            SemanticType::StringList => "string[]",
        }
    }

    /// Mongoose schema type expression
    pub fn mongoose_type(self) -> &'static str {
        match self {
            SemanticType::String | SemanticType::Time => "String",
            SemanticType::Integer | SemanticType::Float => "Number",
            SemanticType::Boolean => "Boolean",
            SemanticType::Date => "Date",
            SemanticType::DateRange => "{ start: Date, end: Date }",
            SemanticType::TimeRange => "{ start: String, end: String }",
            SemanticType::StringList => "[String]",
        }
    }
}

/// Default value of a new record's field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum DefaultValue {
    EmptyString,
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// Current date at the time the generated form is opened
    Now,
    /// Current time of day, `HH:MM`
    CurrentTime,
    NowRange,
    CurrentTimeRange,
    EmptyList,
}

impl DefaultValue {
    pub fn semantic_type(&self) -> SemanticType {
        match self {
            DefaultValue::EmptyString => SemanticType::String,
            DefaultValue::Integer(_) => SemanticType::Integer,
            DefaultValue::Float(_) => SemanticType::Float,
            DefaultValue::Bool(_) => SemanticType::Boolean,
            DefaultValue::Now => SemanticType::Date,
            DefaultValue::CurrentTime => SemanticType::Time,
            DefaultValue::NowRange => SemanticType::DateRange,
            DefaultValue::CurrentTimeRange => SemanticType::TimeRange,
            DefaultValue::EmptyList => SemanticType::StringList,
        }
    }

    /// TypeScript expression producing this default
    pub fn ts_literal(&self) -> String {
        match self {
            DefaultValue::EmptyString => "''".to_string(),
            DefaultValue::Integer(n) => n.to_string(),
            DefaultValue::Float(f) => {
                if f.fract() == 0.0 {
                    format!("{:.0}", f)
                } else {
                    f.to_string()
                }
            }
            DefaultValue::Bool(b) => b.to_string(),
            DefaultValue::Now => "new Date()".to_string(),
            DefaultValue::CurrentTime => "new Date().toTimeString().slice(0, 5)".to_string(),
            DefaultValue::NowRange => "{ start: new Date(), end: new Date() }".to_string(),
            DefaultValue::CurrentTimeRange => {
                "{ start: new Date().toTimeString().slice(0, 5), end: new Date().toTimeString().slice(0, 5) }"
                    .to_string()
            }
            DefaultValue::EmptyList => "[]".to_string(),
        }
    }

    fn for_semantic(semantic: SemanticType) -> Self {
        match semantic {
            SemanticType::String => DefaultValue::EmptyString,
            SemanticType::Integer => DefaultValue::Integer(0),
            SemanticType::Float => DefaultValue::Float(0.0),
            SemanticType::Boolean => DefaultValue::Bool(false),
            SemanticType::Date => DefaultValue::Now,
            SemanticType::Time => DefaultValue::CurrentTime,
            SemanticType::DateRange => DefaultValue::NowRange,
            SemanticType::TimeRange => DefaultValue::CurrentTimeRange,
            SemanticType::StringList => DefaultValue::EmptyList,
        }
    }
}

/// Check applied to a field value before submit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "options", rename_all = "camelCase")]
pub enum ValidatorKind {
    None,
    Email,
    Url,
    Phone,
    Integer,
    Number,
    Date,
    Time,
    OneOf(Vec<String>),
    NonEmptyList,
}

/// Classification of one field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldClass {
    pub widget: WidgetKind,
    pub default_value: DefaultValue,
    pub validator: ValidatorKind,
    pub required: bool,
}

impl FieldClass {
    pub fn semantic_type(&self) -> SemanticType {
        self.widget.semantic_type()
    }
}

/// A field together with its classification, the unit renderers iterate over
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedField {
    pub spec: FieldSpec,
    pub class: FieldClass,
    /// Identifier-safe key, unique within the schema, used for DOM ids
    #[serde(skip)]
    pub local_key: String,
}

impl ClassifiedField {
    pub fn name(&self) -> &str {
        &self.spec.name
    }

    pub fn widget(&self) -> WidgetKind {
        self.class.widget
    }

    pub fn options(&self) -> &[String] {
        self.spec.options()
    }
}

/// Look up a raw tag in the widget table
///
/// Matching ignores case and the separators `-`, `_` and space, so `RICH_TEXT`,
/// `richText` and `rich-text` are the same tag.
pub fn widget_for_tag(tag: &str) -> Option<WidgetKind> {
    let normalized: String = tag
        .chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect();

    let widget = match normalized.as_str() {
        "string" | "text" | "name" => WidgetKind::Text,
        "email" => WidgetKind::Email,
        "url" | "link" | "website" => WidgetKind::Url,
        "phone" | "phonenumber" | "tel" => WidgetKind::Phone,
        "password" => WidgetKind::Password,
        "int" | "integer" | "intnumber" | "number" => WidgetKind::Integer,
        "float" | "floatnumber" | "decimal" | "double" => WidgetKind::Float,
        "bool" | "boolean" | "switch" | "toggle" => WidgetKind::Boolean,
        "checkbox" => WidgetKind::Checkbox,
        "date" | "datetime" => WidgetKind::Date,
        "time" => WidgetKind::Time,
        "daterange" => WidgetKind::DateRange,
        "timerange" => WidgetKind::TimeRange,
        "color" | "colorpicker" => WidgetKind::Color,
        "textarea" | "description" | "longtext" => WidgetKind::Textarea,
        "richtext" | "richtexteditor" | "editor" | "html" => WidgetKind::RichText,
        "select" | "singleselect" | "dropdown" => WidgetKind::Select,
        "radio" | "radiobutton" => WidgetKind::Radio,
        "autocomplete" => WidgetKind::Autocomplete,
        "dynamicselect" => WidgetKind::DynamicSelect,
        "multiselect" | "multioptions" => WidgetKind::MultiSelect,
        "multicheckbox" => WidgetKind::MultiCheckbox,
        "stringarray" | "array" | "tags" | "stringlist" => WidgetKind::StringArray,
        "image" | "imageupload" => WidgetKind::Image,
        "images" | "imagesupload" | "gallery" => WidgetKind::Images,
        _ => return None,
    };

    Some(widget)
}

/// Classify one field; unknown tags fall back to the text widget with a warning
pub fn classify(field: &FieldSpec) -> (FieldClass, Option<GenerationWarning>) {
    let (widget, warning) = match widget_for_tag(&field.field_type) {
        Some(widget) => (widget, None),
        None => (
            WidgetKind::Text,
            Some(GenerationWarning::UnknownFieldType {
                field: field.name.clone(),
                type_tag: field.field_type.clone(),
            }),
        ),
    };

    let validator = match widget {
        WidgetKind::Email => ValidatorKind::Email,
        WidgetKind::Url => ValidatorKind::Url,
        WidgetKind::Phone => ValidatorKind::Phone,
        WidgetKind::Integer => ValidatorKind::Integer,
        WidgetKind::Float => ValidatorKind::Number,
        WidgetKind::Date | WidgetKind::DateRange => ValidatorKind::Date,
        WidgetKind::Time | WidgetKind::TimeRange => ValidatorKind::Time,
        WidgetKind::Select | WidgetKind::Radio if !field.options().is_empty() => {
            ValidatorKind::OneOf(field.options().to_vec())
        }
        WidgetKind::MultiSelect | WidgetKind::MultiCheckbox | WidgetKind::StringArray
            if field.is_required() =>
        {
            ValidatorKind::NonEmptyList
        }
        _ => ValidatorKind::None,
    };

    let class = FieldClass {
        default_value: DefaultValue::for_semantic(widget.semantic_type()),
        widget,
        validator,
        required: field.is_required(),
    };

    (class, warning)
}

/// Classify every field of a schema, collecting warnings in field order
pub fn classify_fields(fields: &[FieldSpec]) -> (Vec<ClassifiedField>, Vec<GenerationWarning>) {
    let mut classified = Vec::with_capacity(fields.len());
    let mut warnings = Vec::new();
    let mut keys = HashSet::new();

    for field in fields {
        let (class, warning) = classify(field);
        if let Some(warning) = warning {
            warnings.push(warning);
        }
        classified.push(ClassifiedField {
            spec: field.clone(),
            class,
            local_key: unique_local_key(&field.name, &mut keys),
        });
    }

    (classified, warnings)
}

/// `first name` and `first_name` share a suffix; later ones get a counter
fn unique_local_key(name: &str, taken: &mut HashSet<String>) -> String {
    let base = ts_local_suffix(name);
    let mut key = base.clone();
    let mut n = 2;
    while !taken.insert(key.clone()) {
        key = format!("{}{}", base, n);
        n += 1;
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_table() {
        let cases = [
            ("STRING", WidgetKind::Text),
            ("EMAIL", WidgetKind::Email),
            ("URL", WidgetKind::Url),
            ("PHONENUMBER", WidgetKind::Phone),
            ("INTNUMBER", WidgetKind::Integer),
            ("DATE", WidgetKind::Date),
            ("TIME", WidgetKind::Time),
            ("TEXTAREA", WidgetKind::Textarea),
            ("description", WidgetKind::Textarea),
            ("SELECT", WidgetKind::Select),
            ("STRINGARRAY", WidgetKind::StringArray),
            ("RICHTEXT", WidgetKind::RichText),
            ("rich-text", WidgetKind::RichText),
            ("multi_select", WidgetKind::MultiSelect),
        ];
        for (tag, widget) in cases {
            assert_eq!(widget_for_tag(tag), Some(widget), "tag {}", tag);
        }
    }

    #[test]
    fn test_defaults_match_semantic_type() {
        for widget in WidgetKind::ALL {
            let default = DefaultValue::for_semantic(widget.semantic_type());
            assert_eq!(default.semantic_type(), widget.semantic_type(), "{:?}", widget);
        }
    }

    #[test]
    fn test_type_matched_defaults() {
        let (int, _) = classify(&FieldSpec::new("views", "INTNUMBER"));
        assert_eq!(int.default_value, DefaultValue::Integer(0));

        let (list, _) = classify(&FieldSpec::new("tags", "STRINGARRAY"));
        assert_eq!(list.default_value, DefaultValue::EmptyList);
        assert_eq!(list.default_value.ts_literal(), "[]");

        let (date, _) = classify(&FieldSpec::new("publishedAt", "DATE"));
        assert_eq!(date.default_value, DefaultValue::Now);

        let (text, _) = classify(&FieldSpec::new("title", "STRING"));
        assert_eq!(text.default_value.ts_literal(), "''");
    }

    #[test]
    fn test_unknown_tag_degrades_to_text() {
        let (class, warning) = classify(&FieldSpec::new("mood", "unknown-x"));
        assert_eq!(class.widget, WidgetKind::Text);
        assert_eq!(class.default_value, DefaultValue::EmptyString);
        assert!(matches!(
            warning,
            Some(GenerationWarning::UnknownFieldType { ref type_tag, .. }) if type_tag == "unknown-x"
        ));
    }

    #[test]
    fn test_select_validator_carries_options() {
        let field = FieldSpec::new("status", "SELECT").with_options(["draft", "live"]);
        let (class, _) = classify(&field);
        assert_eq!(
            class.validator,
            ValidatorKind::OneOf(vec!["draft".to_string(), "live".to_string()])
        );
    }

    #[test]
    fn test_select_without_options() {
        let (class, warning) = classify(&FieldSpec::new("status", "SELECT"));
        assert_eq!(class.validator, ValidatorKind::None);
        assert!(warning.is_none());
    }

    #[test]
    fn test_required_list_is_non_empty() {
        let (class, _) = classify(&FieldSpec::new("tags", "MULTISELECT").required());
        assert_eq!(class.validator, ValidatorKind::NonEmptyList);
        assert!(class.required);
    }

    #[test]
    fn test_classify_fields_collects_warnings() {
        let fields = vec![
            FieldSpec::new("title", "STRING"),
            FieldSpec::new("a", "zzz"),
            FieldSpec::new("b", ""),
        ];
        let (classified, warnings) = classify_fields(&fields);
        assert_eq!(classified.len(), 3);
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn test_local_keys_are_unique() {
        let fields = vec![
            FieldSpec::new("first name", "STRING"),
            FieldSpec::new("first_name", "STRING"),
            FieldSpec::new("firstName", "STRING"),
        ];
        let (classified, _) = classify_fields(&fields);
        let keys: Vec<_> = classified.iter().map(|f| f.local_key.as_str()).collect();
        assert_eq!(keys, ["FirstName", "FirstName2", "FirstName3"]);
    }
}
