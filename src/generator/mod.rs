use crate::config::StubConfig;
use crate::generator::params::strip_default_arguments;
use crate::parser::declaration::DeclarationRecord;
use crate::parser::extract;
use crate::parser::marker::TypeNameMarker;

pub mod params;

/// Result of turning one header into definitions.
#[derive(Debug, Eq, PartialEq, Clone)]
pub enum Generated {
    /// No declarations were found; nothing should be written.
    Empty,
    Stubs { source: String, declarations: usize },
}

/// Constructors and destructors of the enclosing type never get a return type.
fn is_structural(marker: Option<&TypeNameMarker>, record: &DeclarationRecord) -> bool {
    match marker {
        Some(marker) => {
            record.name == marker.name
                || record
                    .name
                    .strip_prefix('~')
                    .is_some_and(|name| name == marker.name)
        }
        None => false,
    }
}

fn render_record(
    out: &mut String,
    marker: Option<&TypeNameMarker>,
    record: &DeclarationRecord,
    config: &StubConfig,
) {
    let structural = is_structural(marker, record);

    let qualified_name = match marker {
        Some(marker) => format!("{}::{}", marker.name, record.name),
        None => record.name.clone(),
    };
    let parameters = if config.strip_default_arguments {
        strip_default_arguments(&record.parameters)
    } else {
        record.parameters.clone()
    };
    let qualifier = if config.keep_const_qualifier && record.is_const_qualified {
        " const"
    } else {
        ""
    };

    if !structural && !record.return_type.is_empty() {
        out.push_str(&record.return_type);
        out.push(' ');
    }
    out.push_str(&format!("{qualified_name}({parameters}){qualifier} {{\n"));

    let returns_nothing = structural
        || record.return_type.is_empty()
        || record.return_type == config.no_value_type;
    if returns_nothing {
        out.push_str(&format!("    // {}\n", config.placeholder));
    } else {
        out.push_str(&format!("    return {{}}; // {}\n", config.placeholder));
    }

    out.push_str("}\n\n");
}

/// Renders an include of `origin_name` followed by one stub definition per record, in order.
pub fn render(
    marker: Option<&TypeNameMarker>,
    records: &[DeclarationRecord],
    origin_name: &str,
    config: &StubConfig,
) -> String {
    let mut out = format!("#include \"{origin_name}\"\n\n");
    for record in records {
        render_record(&mut out, marker, record, config);
    }

    out
}

/// Extracts declarations from `text` and renders them, reporting `Empty` instead of a
/// preamble-only file when there is nothing to define.
pub fn generate(text: &str, origin_name: &str, config: &StubConfig) -> Generated {
    let extraction = extract(text, config);
    if extraction.records.is_empty() {
        return Generated::Empty;
    }

    Generated::Stubs {
        source: render(
            extraction.marker.as_ref(),
            &extraction.records,
            origin_name,
            config,
        ),
        declarations: extraction.records.len(),
    }
}
