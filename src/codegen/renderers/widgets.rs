//! Dedicated widget components written to `components/others-field-type/`.
//!
//! Every widget takes `{ id, value, onChange }` and, for option pickers,
//! `options`. Only widgets used by the schema are emitted.

use crate::codegen::context::GenerationContext;
use crate::codegen::field_types::WidgetKind;
use crate::codegen::renderers::form::INPUT_CLASS;
use std::fmt::{self, Write};

/// TS type of the `value` prop; `onChange` always emits the stored type
fn value_type(widget: WidgetKind) -> &'static str {
    match widget {
        // values coming back from the API are ISO strings
        WidgetKind::Date => "Date | string",
        WidgetKind::DateRange => "{ start: Date | string; end: Date | string }",
        other => other.semantic_type().ts_type(),
    }
}

fn react_imports(widget: WidgetKind) -> Option<&'static str> {
    match widget {
        WidgetKind::Autocomplete | WidgetKind::DynamicSelect | WidgetKind::StringArray => Some("useState"),
        WidgetKind::Images => Some("useRef"),
        _ => None,
    }
}

pub fn render_widget(
    _ctx: &GenerationContext,
    widget: WidgetKind,
    component: &str,
) -> Result<String, fmt::Error> {
    // plain inputs have no component of their own
    let body = body(widget).ok_or(fmt::Error)?;
    let mut out = String::new();

    writeln!(out, "'use client';")?;
    writeln!(out)?;
    if let Some(hooks) = react_imports(widget) {
        writeln!(out, "import {{ {} }} from 'react';", hooks)?;
    }
    if widget == WidgetKind::RichText {
        writeln!(out, "import dynamic from 'next/dynamic';")?;
        writeln!(out, "import 'react-quill/dist/quill.snow.css';")?;
        writeln!(out)?;
        writeln!(out, "const ReactQuill = dynamic(() => import('react-quill'), {{ ssr: false }});")?;
    }
    writeln!(out)?;
    writeln!(out, "interface {}Props {{", component)?;
    writeln!(out, "  id?: string;")?;
    writeln!(out, "  value: {};", value_type(widget))?;
    writeln!(out, "  onChange: (value: {}) => void;", widget.semantic_type().ts_type())?;
    if widget.uses_options() {
        writeln!(out, "  options: string[];")?;
    }
    writeln!(out, "}}")?;
    writeln!(out)?;

    let props = if widget.uses_options() {
        "{ id, value, onChange, options }"
    } else {
        "{ id, value, onChange }"
    };
    writeln!(out, "export default function {}({}: {}Props) {{", component, props, component)?;
    out.push_str(&body.replace("$INPUT", INPUT_CLASS));
    writeln!(out, "}}")?;

    Ok(out)
}

fn body(widget: WidgetKind) -> Option<&'static str> {
    let body = match widget {
        WidgetKind::Select => SELECT,
        WidgetKind::Radio => RADIO,
        WidgetKind::Autocomplete => AUTOCOMPLETE,
        WidgetKind::DynamicSelect => DYNAMIC_SELECT,
        WidgetKind::MultiSelect => MULTI_SELECT,
        WidgetKind::MultiCheckbox => MULTI_CHECKBOX,
        WidgetKind::StringArray => STRING_ARRAY,
        WidgetKind::RichText => RICH_TEXT,
        WidgetKind::Date => DATE,
        WidgetKind::Time => TIME,
        WidgetKind::DateRange => DATE_RANGE,
        WidgetKind::TimeRange => TIME_RANGE,
        WidgetKind::Color => COLOR,
        WidgetKind::Image => IMAGE,
        WidgetKind::Images => IMAGES,
        WidgetKind::Text
        | WidgetKind::Email
        | WidgetKind::Url
        | WidgetKind::Phone
        | WidgetKind::Password
        | WidgetKind::Integer
        | WidgetKind::Float
        | WidgetKind::Boolean
        | WidgetKind::Checkbox
        | WidgetKind::Textarea => return None,
    };
    Some(body)
}

const SELECT: &str = r#"  return (
    <select id={id} className="$INPUT" value={value ?? ''} onChange={(e) => onChange(e.target.value)}>
      <option value="">Select...</option>
      {options.map((option) => (
        <option key={option} value={option}>
          {option}
        </option>
      ))}
    </select>
  );
"#;

const RADIO: &str = r#"  return (
    <div id={id} className="flex flex-wrap gap-4">
      {options.map((option) => (
        <label key={option} className="flex items-center gap-2 text-sm">
          <input type="radio" name={id} value={option} checked={value === option} onChange={() => onChange(option)} />
          {option}
        </label>
      ))}
    </div>
  );
"#;

const AUTOCOMPLETE: &str = r#"  const [open, setOpen] = useState(false);
  const matches = options.filter((option) => option.toLowerCase().includes((value ?? '').toLowerCase()));

  return (
    <div className="relative">
      <input
        id={id}
        className="$INPUT"
        value={value ?? ''}
        onChange={(e) => {
          onChange(e.target.value);
          setOpen(true);
        }}
        onFocus={() => setOpen(true)}
        onBlur={() => setTimeout(() => setOpen(false), 150)}
      />
      {open && matches.length > 0 && (
        <ul className="absolute z-10 mt-1 max-h-48 w-full overflow-y-auto rounded border border-gray-200 bg-white shadow">
          {matches.map((option) => (
            <li key={option}>
              <button type="button" className="w-full px-3 py-1 text-left text-sm hover:bg-gray-100" onMouseDown={() => onChange(option)}>
                {option}
              </button>
            </li>
          ))}
        </ul>
      )}
    </div>
  );
"#;

const DYNAMIC_SELECT: &str = r#"  const [extra, setExtra] = useState<string[]>([]);
  const [draft, setDraft] = useState('');
  const all = [...options, ...extra.filter((option) => !options.includes(option))];

  const addOption = () => {
    const next = draft.trim();
    if (!next) return;
    if (!all.includes(next)) setExtra([...extra, next]);
    onChange(next);
    setDraft('');
  };

  return (
    <div className="flex flex-col gap-2">
      <select id={id} className="$INPUT" value={value ?? ''} onChange={(e) => onChange(e.target.value)}>
        <option value="">Select...</option>
        {all.map((option) => (
          <option key={option} value={option}>
            {option}
          </option>
        ))}
      </select>
      <div className="flex gap-2">
        <input className="$INPUT" placeholder="Add option" value={draft} onChange={(e) => setDraft(e.target.value)} />
        <button type="button" className="rounded border border-gray-300 px-3 text-sm" onClick={addOption}>
          Add
        </button>
      </div>
    </div>
  );
"#;

const MULTI_SELECT: &str = r#"  const selected = value ?? [];

  return (
    <select
      id={id}
      multiple
      className="$INPUT"
      value={selected}
      onChange={(e) => onChange(Array.from(e.target.selectedOptions, (option) => option.value))}
    >
      {options.map((option) => (
        <option key={option} value={option}>
          {option}
        </option>
      ))}
    </select>
  );
"#;

const MULTI_CHECKBOX: &str = r#"  const selected = value ?? [];

  const toggle = (option: string) =>
    onChange(selected.includes(option) ? selected.filter((item) => item !== option) : [...selected, option]);

  return (
    <div id={id} className="flex flex-wrap gap-4">
      {options.map((option) => (
        <label key={option} className="flex items-center gap-2 text-sm">
          <input type="checkbox" checked={selected.includes(option)} onChange={() => toggle(option)} />
          {option}
        </label>
      ))}
    </div>
  );
"#;

const STRING_ARRAY: &str = r#"  const [draft, setDraft] = useState('');
  const items = value ?? [];

  const add = () => {
    const next = draft.trim();
    if (!next) return;
    onChange([...items, next]);
    setDraft('');
  };

  return (
    <div>
      <div className="flex gap-2">
        <input
          id={id}
          className="$INPUT"
          value={draft}
          onChange={(e) => setDraft(e.target.value)}
          onKeyDown={(e) => {
            if (e.key === 'Enter') {
              e.preventDefault();
              add();
            }
          }}
        />
        <button type="button" className="rounded border border-gray-300 px-3 text-sm" onClick={add}>
          Add
        </button>
      </div>
      <div className="mt-2 flex flex-wrap gap-2">
        {items.map((item, index) => (
          <span key={`${item}-${index}`} className="flex items-center gap-1 rounded bg-gray-100 px-2 py-1 text-xs">
            {item}
            <button type="button" onClick={() => onChange(items.filter((_, i) => i !== index))}>
              &times;
            </button>
          </span>
        ))}
      </div>
    </div>
  );
"#;

const RICH_TEXT: &str = r#"  return (
    <div id={id}>
      <ReactQuill theme="snow" value={value ?? ''} onChange={(content: string) => onChange(content)} />
    </div>
  );
"#;

const DATE: &str = r#"  const toInput = (date: Date | string) => {
    const parsed = new Date(date);
    return Number.isNaN(parsed.getTime()) ? '' : parsed.toISOString().slice(0, 10);
  };

  return (
    <input
      id={id}
      type="date"
      className="$INPUT"
      value={value ? toInput(value) : ''}
      onChange={(e) => onChange(new Date(e.target.value))}
    />
  );
"#;

const TIME: &str = r#"  return <input id={id} type="time" className="$INPUT" value={value ?? ''} onChange={(e) => onChange(e.target.value)} />;
"#;

const DATE_RANGE: &str = r#"  const toInput = (date: Date | string) => {
    const parsed = new Date(date);
    return Number.isNaN(parsed.getTime()) ? '' : parsed.toISOString().slice(0, 10);
  };
  const range = value ?? { start: new Date(), end: new Date() };

  return (
    <div id={id} className="flex items-center gap-2">
      <input
        type="date"
        className="$INPUT"
        value={toInput(range.start)}
        onChange={(e) => onChange({ start: new Date(e.target.value), end: new Date(range.end) })}
      />
      <span className="text-sm text-gray-500">to</span>
      <input
        type="date"
        className="$INPUT"
        value={toInput(range.end)}
        onChange={(e) => onChange({ start: new Date(range.start), end: new Date(e.target.value) })}
      />
    </div>
  );
"#;

const TIME_RANGE: &str = r#"  const range = value ?? { start: '', end: '' };

  return (
    <div id={id} className="flex items-center gap-2">
      <input type="time" className="$INPUT" value={range.start} onChange={(e) => onChange({ ...range, start: e.target.value })} />
      <span className="text-sm text-gray-500">to</span>
      <input type="time" className="$INPUT" value={range.end} onChange={(e) => onChange({ ...range, end: e.target.value })} />
    </div>
  );
"#;

const COLOR: &str = r##"  return (
    <div className="flex items-center gap-2">
      <input id={id} type="color" className="h-10 w-14 rounded border border-gray-300" value={value || '#000000'} onChange={(e) => onChange(e.target.value)} />
      <input className="$INPUT" value={value ?? ''} onChange={(e) => onChange(e.target.value)} />
    </div>
  );
"##;

const IMAGE: &str = r#"  const handleFile = (file: File | undefined) => {
    if (!file) return;
    const reader = new FileReader();
    reader.onload = () => onChange(String(reader.result ?? ''));
    reader.readAsDataURL(file);
  };

  return (
    <div className="flex flex-col gap-2">
      <input id={id} type="file" accept="image/*" onChange={(e) => handleFile(e.target.files?.[0])} />
      <input className="$INPUT" placeholder="or paste an image URL" value={value ?? ''} onChange={(e) => onChange(e.target.value)} />
      {value && <img src={value} alt="" className="h-24 w-24 rounded object-cover" />}
    </div>
  );
"#;

const IMAGES: &str = r#"  const inputRef = useRef<HTMLInputElement>(null);
  const images = value ?? [];

  const readFile = (file: File) =>
    new Promise<string>((resolve) => {
      const reader = new FileReader();
      reader.onload = () => resolve(String(reader.result ?? ''));
      reader.readAsDataURL(file);
    });

  const handleFiles = async (files: FileList | null) => {
    if (!files) return;
    const added = await Promise.all(Array.from(files).map(readFile));
    onChange([...images, ...added]);
    if (inputRef.current) inputRef.current.value = '';
  };

  return (
    <div className="flex flex-col gap-2">
      <input id={id} ref={inputRef} type="file" accept="image/*" multiple onChange={(e) => handleFiles(e.target.files)} />
      <div className="flex flex-wrap gap-2">
        {images.map((src, index) => (
          <div key={`${src.slice(-16)}-${index}`} className="relative">
            <img src={src} alt="" className="h-16 w-16 rounded object-cover" />
            <button
              type="button"
              className="absolute -right-1 -top-1 rounded-full bg-white px-1 text-xs shadow"
              onClick={() => onChange(images.filter((_, i) => i !== index))}
            >
              &times;
            </button>
          </div>
        ))}
      </div>
    </div>
  );
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::context::test_support::posts_context;

    #[test]
    fn test_every_component_widget_renders() {
        let ctx = posts_context();
        for widget in WidgetKind::ALL {
            if let Some(component) = widget.widget_component() {
                let source = render_widget(&ctx, widget, component).unwrap();
                assert!(source.contains(&format!("export default function {}(", component)));
                assert!(!source.contains("$INPUT"), "{} kept a placeholder", component);
            }
        }
    }

    #[test]
    fn test_option_widgets_take_options() {
        let select = render_widget(&posts_context(), WidgetKind::Select, "SelectField").unwrap();
        assert!(select.contains("  options: string[];"));
        assert!(select.contains("export default function SelectField({ id, value, onChange, options }: SelectFieldProps) {"));

        let date = render_widget(&posts_context(), WidgetKind::Date, "DateField").unwrap();
        assert!(!date.contains("options"));
        assert!(date.contains("  value: Date | string;"));
    }

    #[test]
    fn test_rich_text_loads_editor_client_side() {
        let rich = render_widget(&posts_context(), WidgetKind::RichText, "RichTextField").unwrap();
        assert!(rich.contains("dynamic(() => import('react-quill'), { ssr: false })"));
    }

    #[test]
    fn test_plain_widgets_have_no_component() {
        for widget in WidgetKind::ALL {
            assert_eq!(body(widget).is_some(), widget.widget_component().is_some(), "{:?}", widget);
        }
        assert!(render_widget(&posts_context(), WidgetKind::Text, "TextField").is_err());
    }
}
