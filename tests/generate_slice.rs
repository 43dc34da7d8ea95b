//! End-to-end generation runs against temporary project directories.

use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use template_generator::codegen::{Generator, GenerationWarning, NamingKeys};
use template_generator::{generate_from_json, GenerationError, GeneratorConfig};

fn posts_schema(use_generate_folder: bool) -> String {
    json!({
        "namingConvention": {
            "Users_1_000___": "Posts",
            "users_2_000___": "posts",
            "User_3_000___": "Post",
            "use_generate_folder": use_generate_folder
        },
        "fields": [
            {"name": "title", "type": "STRING", "required": true},
            {"name": "views", "type": "INTNUMBER"},
            {"name": "tags", "type": "STRINGARRAY"},
            {"name": "status", "type": "SELECT", "options": ["draft", "published"]},
            {"name": "publishedAt", "type": "DATE"}
        ]
    })
    .to_string()
}

fn config_for(dir: &TempDir) -> GeneratorConfig {
    GeneratorConfig {
        project_root: dir.path().to_path_buf(),
        ..GeneratorConfig::default()
    }
}

fn files_under(root: &Path) -> Vec<String> {
    fn walk(dir: &Path, base: &Path, out: &mut Vec<String>) {
        if let Ok(entries) = fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.is_dir() {
                    walk(&path, base, out);
                } else if let Ok(rel) = path.strip_prefix(base) {
                    out.push(rel.to_string_lossy().replace('\\', "/"));
                }
            }
        }
    }
    let mut out = Vec::new();
    walk(root, root, &mut out);
    out.sort();
    out
}

#[test]
fn test_dashboard_root_by_default() {
    let dir = TempDir::new().unwrap();
    let report = generate_from_json(&posts_schema(false), &config_for(&dir)).unwrap();

    assert_eq!(report.root, "dashboard");
    assert!(dir.path().join("src/app/dashboard/posts/all/page.tsx").is_file());
    assert!(dir.path().join("src/app/dashboard/posts/all/redux/rtk-api.ts").is_file());
    assert!(dir.path().join("src/app/dashboard/posts/all/components/TableView.tsx").is_file());
    assert!(dir
        .path()
        .join("src/app/dashboard/posts/all/components/others-field-type/StringArrayField.tsx")
        .is_file());
    assert!(!dir.path().join("src/app/generate").exists());
}

#[test]
fn test_generate_root_when_flag_set() {
    let dir = TempDir::new().unwrap();
    let report = generate_from_json(&posts_schema(true), &config_for(&dir)).unwrap();

    assert_eq!(report.root, "generate");
    assert!(dir.path().join("src/app/generate/posts/all/page.tsx").is_file());
    assert!(!dir.path().join("src/app/dashboard/posts").exists());
    assert!(files_under(dir.path())
        .iter()
        .all(|f| f.starts_with("src/app/generate/posts/")));
}

#[test]
fn test_missing_plural_pascal_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let schema = json!({
        "namingConvention": {"users_2_000___": "posts", "User_3_000___": "Post"},
        "fields": [{"name": "title", "type": "STRING"}]
    })
    .to_string();

    let err = generate_from_json(&schema, &config_for(&dir)).unwrap_err();
    match err {
        GenerationError::MissingNamingField { key } => assert_eq!(key, "Users_1_000___"),
        other => panic!("unexpected error {:?}", other),
    }
    assert!(files_under(dir.path()).is_empty());
}

#[test]
fn test_unknown_field_type_degrades_to_text() {
    let dir = TempDir::new().unwrap();
    let schema = json!({
        "namingConvention": {"Users_1_000___": "Posts", "users_2_000___": "posts", "User_3_000___": "Post"},
        "fields": [{"name": "mood", "type": "unknown-x"}]
    })
    .to_string();

    let report = generate_from_json(&schema, &config_for(&dir)).unwrap();
    assert!(report
        .warnings
        .iter()
        .any(|w| matches!(w, GenerationWarning::UnknownFieldType { field, .. } if field == "mood")));

    let add = fs::read_to_string(dir.path().join("src/app/dashboard/posts/all/components/Add.tsx")).unwrap();
    assert!(add.contains("<input id=\"add-Mood\" type=\"text\""));

    let data = fs::read_to_string(dir.path().join("src/app/dashboard/posts/all/store/data/data.ts")).unwrap();
    assert!(data.contains("mood: '',"));
}

#[test]
fn test_generation_is_deterministic() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    generate_from_json(&posts_schema(false), &config_for(&first)).unwrap();
    generate_from_json(&posts_schema(false), &config_for(&second)).unwrap();

    let files = files_under(first.path());
    assert_eq!(files, files_under(second.path()));
    for file in &files {
        assert_eq!(
            fs::read(first.path().join(file)).unwrap(),
            fs::read(second.path().join(file)).unwrap(),
            "{} differs",
            file
        );
    }
}

#[test]
fn test_regeneration_overwrites() {
    let dir = TempDir::new().unwrap();
    let page = dir.path().join("src/app/dashboard/posts/all/page.tsx");
    fs::create_dir_all(page.parent().unwrap()).unwrap();
    fs::write(&page, "stale").unwrap();

    generate_from_json(&posts_schema(false), &config_for(&dir)).unwrap();
    assert_ne!(fs::read_to_string(&page).unwrap(), "stale");
}

#[test]
fn test_custom_naming_keys() {
    let dir = TempDir::new().unwrap();
    let keys = NamingKeys {
        plural_pascal: "pluralPascal".to_string(),
        plural_lower: "pluralLower".to_string(),
        singular_pascal: "singularPascal".to_string(),
        ..NamingKeys::default()
    };
    let schema = json!({
        "namingConvention": {"pluralPascal": "Invoices", "pluralLower": "invoices", "singularPascal": "Invoice"},
        "fields": [{"name": "amount", "type": "FLOATNUMBER"}]
    })
    .to_string();

    let report = Generator::new(dir.path(), keys).generate(&schema).unwrap();
    assert_eq!(report.folder_name, "invoices");
    assert!(dir.path().join("src/app/dashboard/invoices/api/v1/model.ts").is_file());
}

#[test]
fn test_demo_schema_file() {
    let dir = TempDir::new().unwrap();
    let schema = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/posts.schema.json");
    let report = template_generator::generate_from_file(&schema, &config_for(&dir)).unwrap();

    assert!(report.warnings.is_empty());
    let widgets = dir.path().join("src/app/dashboard/posts/all/components/others-field-type");
    for widget in ["MultiCheckboxField.tsx", "ImageUploadField.tsx", "RichTextField.tsx", "SelectField.tsx"] {
        assert!(widgets.join(widget).is_file(), "missing {}", widget);
    }
}

#[test]
fn test_malformed_field_attributes_degrade() {
    let dir = TempDir::new().unwrap();
    let schema = json!({
        "namingConvention": {"Users_1_000___": "Posts", "users_2_000___": "posts", "User_3_000___": "Post"},
        "fields": [
            {"name": "mood", "type": null},
            {"name": "rank", "type": 5},
            {"name": "status", "type": "SELECT", "options": [1, 2]},
            {"name": "title", "type": "STRING", "required": "yes"}
        ]
    })
    .to_string();

    let report = generate_from_json(&schema, &config_for(&dir)).unwrap();
    let unknown: Vec<_> = report
        .warnings
        .iter()
        .filter_map(|w| match w {
            GenerationWarning::UnknownFieldType { field, .. } => Some(field.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(unknown, ["mood", "rank"]);

    let add = fs::read_to_string(dir.path().join("src/app/dashboard/posts/all/components/Add.tsx")).unwrap();
    assert!(add.contains("<input id=\"add-Mood\" type=\"text\""));
    assert!(add.contains("options={[]}"));
}

#[test]
fn test_reserved_field_name_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let schema = json!({
        "namingConvention": {"Users_1_000___": "Posts", "users_2_000___": "posts", "User_3_000___": "Post"},
        "fields": [{"name": "createdAt", "type": "DATE"}]
    })
    .to_string();

    let err = generate_from_json(&schema, &config_for(&dir)).unwrap_err();
    assert!(matches!(err, GenerationError::SchemaParse(ref msg) if msg.contains("createdAt")));
    assert!(files_under(dir.path()).is_empty());
}
