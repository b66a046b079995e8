use convert_case::{Case, Casing};
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Service data file, as read by the library at runtime
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
struct ServiceFile {
    name: String,
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    actions: Vec<ActionEntry>,
    #[serde(default)]
    resources: Vec<ResourceEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
struct ActionEntry {
    name: String,
    access_level: String,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
struct ResourceEntry {
    name: String,
    #[serde(rename = "ARNFormat")]
    arn_format: String,
}

const ACCESS_LEVELS: [&str; 5] = ["Read", "Write", "List", "Tagging", "Permissions management"];

const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// Keywords that cannot be raw identifiers
const RESERVED: &[&str] = &["crate", "self", "Self", "super", "_"];

type BuildResult<T> = Result<T, Box<dyn std::error::Error>>;

fn main() {
    println!("cargo:rerun-if-changed=resources/services");

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    let services_dir = Path::new("resources/services");
    if !services_dir.exists() {
        panic!(
            "Required service data directory not found at: {}",
            services_dir.display()
        );
    }

    let services = match load_services(services_dir) {
        Ok(services) => services,
        Err(e) => panic!("Failed to load service data: {}", e),
    };

    let code = match generate(&services) {
        Ok(code) => code,
        Err(e) => panic!("Failed to generate service API: {}", e),
    };

    fs::write(Path::new(&out_dir).join("services.rs"), code)
        .expect("Failed to write generated service API");
}

fn load_services(services_dir: &Path) -> BuildResult<Vec<ServiceFile>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(services_dir)? {
        let path = entry?.path();
        if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
            println!("cargo:rerun-if-changed={}", path.display());
            paths.push(path);
        }
    }
    paths.sort();

    let mut services = Vec::new();
    for path in paths {
        let content = fs::read_to_string(&path)?;
        let service: ServiceFile = serde_json::from_str(&content)
            .map_err(|e| format!("{}: {}", path.display(), e))?;

        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
        if stem != service.name {
            return Err(format!(
                "{}: file name does not match service name '{}'",
                path.display(),
                service.name
            )
            .into());
        }
        validate_service(&service).map_err(|e| format!("{}: {}", path.display(), e))?;
        services.push(service);
    }

    Ok(services)
}

/// Placeholder names of an ARN format, in order; rejects malformed templates
fn placeholders(arn_format: &str) -> BuildResult<Vec<String>> {
    let placeholder = Regex::new(r"\$\{([^}]*)\}")?;
    let valid_name = Regex::new(r"^[A-Za-z0-9_-]+$")?;

    let mut names = Vec::new();
    for captures in placeholder.captures_iter(arn_format) {
        let name = &captures[1];
        if !valid_name.is_match(name) {
            return Err(format!("invalid placeholder '${{{}}}' in '{}'", name, arn_format).into());
        }
        names.push(name.to_string());
    }

    if placeholder.replace_all(arn_format, "").contains("${") {
        return Err(format!("unterminated placeholder in '{}'", arn_format).into());
    }

    Ok(names)
}

fn validate_service(service: &ServiceFile) -> BuildResult<()> {
    let service_name = Regex::new(r"^[a-z0-9][a-z0-9-]*$")?;
    let action_name = Regex::new(r"^[A-Z][A-Za-z0-9]*$")?;

    if !service_name.is_match(&service.name) {
        return Err(format!("invalid service name '{}'", service.name).into());
    }

    // `ALL` is taken by the `<service>:*` constant
    let mut constants = BTreeSet::from(["ALL".to_string()]);
    for action in &service.actions {
        if !action_name.is_match(&action.name) {
            return Err(format!("invalid action name '{}'", action.name).into());
        }
        if !ACCESS_LEVELS.contains(&action.access_level.as_str()) {
            return Err(format!(
                "action '{}' has unknown access level '{}'",
                action.name, action.access_level
            )
            .into());
        }
        if !constants.insert(constant_name(&action.name)) {
            return Err(format!("action '{}' is defined more than once", action.name).into());
        }
    }

    let mut functions = BTreeSet::new();
    for resource in &service.resources {
        if !resource.arn_format.starts_with("arn:") {
            return Err(format!("resource '{}' ARN format must start with 'arn:'", resource.name).into());
        }
        placeholders(&resource.arn_format)?;
        if !functions.insert(identifier(&resource.name.to_case(Case::Snake))) {
            return Err(format!("resource '{}' is defined more than once", resource.name).into());
        }
    }

    Ok(())
}

/// Make `name` usable as a Rust identifier
fn identifier(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }

    if RESERVED.contains(&ident.as_str()) {
        format!("{}_", ident)
    } else if KEYWORDS.contains(&ident.as_str()) {
        format!("r#{}", ident)
    } else {
        ident
    }
}

fn constant_name(action: &str) -> String {
    identifier(&action.to_case(Case::Snake).to_uppercase())
}

fn doc_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn generate(services: &[ServiceFile]) -> BuildResult<String> {
    let mut out = String::new();
    writeln!(out, "// Generated by build.rs from resources/services. Do not edit.")?;
    writeln!(out)?;

    writeln!(out, "/// Names of all services, sorted")?;
    writeln!(out, "pub const SERVICES: &[&str] = &[")?;
    for service in services {
        writeln!(out, "    {:?},", service.name)?;
    }
    writeln!(out, "];")?;
    writeln!(out)?;

    writeln!(out, "/// Every service with its action names")?;
    writeln!(out, "pub const SERVICE_ACTIONS: &[(&str, &[&str])] = &[")?;
    for service in services {
        writeln!(
            out,
            "    ({:?}, {}::ALL_ACTIONS),",
            service.name,
            identifier(&service.name.to_case(Case::Snake))
        )?;
    }
    writeln!(out, "];")?;
    writeln!(out)?;

    writeln!(out, "/// Every service with its resource types and ARN templates")?;
    writeln!(
        out,
        "pub const SERVICE_RESOURCE_TYPES: &[(&str, &[(&str, &str)])] = &["
    )?;
    for service in services {
        writeln!(
            out,
            "    ({:?}, {}::RESOURCE_TYPES),",
            service.name,
            identifier(&service.name.to_case(Case::Snake))
        )?;
    }
    writeln!(out, "];")?;

    for service in services {
        writeln!(out)?;
        generate_service(&mut out, service)?;
    }

    Ok(out)
}

fn generate_service(out: &mut String, service: &ServiceFile) -> BuildResult<()> {
    let module = identifier(&service.name.to_case(Case::Snake));

    match &service.full_name {
        Some(full_name) => writeln!(out, "/// {} (`{}`)", doc_line(full_name), service.name)?,
        None => writeln!(out, "/// `{}`", service.name)?,
    }
    writeln!(out, "pub mod {} {{", module)?;
    writeln!(out, "    /// Service namespace used as the action prefix")?;
    writeln!(out, "    pub const SERVICE: &str = {:?};", service.name)?;
    writeln!(out)?;

    writeln!(out, "    /// Qualified action names")?;
    writeln!(out, "    pub mod actions {{")?;
    writeln!(out, "        /// Every action of the service")?;
    writeln!(out, "        pub const ALL: &str = {:?};", format!("{}:*", service.name))?;
    for action in &service.actions {
        writeln!(out)?;
        match &action.description {
            Some(description) => writeln!(
                out,
                "        /// {}: {}",
                action.access_level,
                doc_line(description)
            )?,
            None => writeln!(out, "        /// {}", action.access_level)?,
        }
        writeln!(
            out,
            "        pub const {}: &str = {:?};",
            constant_name(&action.name),
            format!("{}:{}", service.name, action.name)
        )?;
    }
    writeln!(out, "    }}")?;
    writeln!(out)?;

    writeln!(out, "    /// Every action of the service, in data file order")?;
    writeln!(out, "    pub const ALL_ACTIONS: &[&str] = &[")?;
    for action in &service.actions {
        writeln!(out, "        actions::{},", constant_name(&action.name))?;
    }
    writeln!(out, "    ];")?;
    writeln!(out)?;

    writeln!(out, "    /// Resource type names and their ARN templates")?;
    writeln!(out, "    pub const RESOURCE_TYPES: &[(&str, &str)] = &[")?;
    for resource in &service.resources {
        writeln!(
            out,
            "        ({:?}, resources::{}),",
            resource.name,
            template_const(&resource.name)
        )?;
    }
    writeln!(out, "    ];")?;
    writeln!(out)?;

    writeln!(out, "    /// ARN builders, one per resource type")?;
    writeln!(out, "    pub mod resources {{")?;
    for resource in &service.resources {
        generate_resource(out, resource)?;
    }
    writeln!(out, "    }}")?;
    writeln!(out, "}}")?;

    Ok(())
}

fn template_const(resource: &str) -> String {
    identifier(&resource.to_case(Case::Snake).to_uppercase()) + "_ARN_FORMAT"
}

fn generate_resource(out: &mut String, resource: &ResourceEntry) -> BuildResult<()> {
    let function = identifier(&resource.name.to_case(Case::Snake));
    let template = template_const(&resource.name);

    // One field per distinct placeholder, keyed by its normalized name
    let mut fields: Vec<(String, String)> = Vec::new();
    for placeholder in placeholders(&resource.arn_format)? {
        let key = placeholder.to_case(Case::Camel);
        if fields.iter().all(|(existing, _)| *existing != key) {
            fields.push((key, identifier(&placeholder.to_case(Case::Snake))));
        }
    }

    writeln!(out)?;
    writeln!(out, "        /// ARN template of the `{}` resource type", resource.name)?;
    writeln!(
        out,
        "        pub const {}: &str = {:?};",
        template, resource.arn_format
    )?;
    writeln!(out)?;

    if fields.is_empty() {
        writeln!(out, "        /// `{}`", resource.arn_format)?;
        writeln!(out, "        pub fn {}() -> String {{", function)?;
        writeln!(out, "            {}.to_string()", template)?;
        writeln!(out, "        }}")?;
        return Ok(());
    }

    let arguments = format!("{}Arn", resource.name.to_case(Case::Pascal));
    let arguments = identifier(&arguments);

    writeln!(
        out,
        "        /// Placeholder values for the `{}` ARN; `None` renders as `*`",
        resource.name
    )?;
    writeln!(out, "        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]")?;
    writeln!(out, "        pub struct {}<'a> {{", arguments)?;
    for (_, field) in &fields {
        writeln!(out, "            pub {}: Option<&'a str>,", field)?;
    }
    writeln!(out, "        }}")?;
    writeln!(out)?;

    writeln!(
        out,
        "        impl crate::placeholders::PlaceholderValues for {}<'_> {{",
        arguments
    )?;
    writeln!(
        out,
        "            fn value(&self, placeholder: &str) -> Option<&str> {{"
    )?;
    writeln!(
        out,
        "                match crate::placeholders::normalize_placeholder(placeholder).as_str() {{"
    )?;
    for (key, field) in &fields {
        writeln!(out, "                    {:?} => self.{},", key, field)?;
    }
    writeln!(out, "                    _ => None,")?;
    writeln!(out, "                }}")?;
    writeln!(out, "            }}")?;
    writeln!(out, "        }}")?;
    writeln!(out)?;

    writeln!(out, "        /// `{}`", resource.arn_format)?;
    writeln!(
        out,
        "        pub fn {}(args: &{}<'_>) -> String {{",
        function, arguments
    )?;
    writeln!(out, "            crate::arn::render({}, args)", template)?;
    writeln!(out, "        }}")?;

    Ok(())
}
