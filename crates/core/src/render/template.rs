use chainscope_api::models::{Chain, ChainElement, ChainElementKind};
use serde::Serialize;
use std::collections::HashMap;

/// Text inserted for a chain proposal.
///
/// `title` is what the user sees in the proposal list, `body` is the
/// insertion template with `${var}` placeholders for arguments and array
/// indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainTemplate {
    pub title: String,
    pub body: String,
    pub description: String,
}

impl ChainTemplate {
    pub fn create(chain: &Chain) -> Self {
        Self {
            title: chain_code(chain, CodeStyle::Title),
            body: chain_code(chain, CodeStyle::Body),
            description: describe_length(chain.len()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CodeStyle {
    Title,
    Body,
}

fn describe_length(len: usize) -> String {
    if len == 1 {
        "1 element".to_string()
    } else {
        format!("{} elements", len)
    }
}

fn chain_code(chain: &Chain, style: CodeStyle) -> String {
    let mut vars = TemplateVariables::default();
    let mut parts = Vec::with_capacity(chain.len());
    let last = chain.len().saturating_sub(1);

    for (index, element) in chain.elements().iter().enumerate() {
        let mut code = String::new();
        match element.kind() {
            ChainElementKind::Field | ChainElementKind::LocalVariable => {
                if index == 0 && element.requires_this_qualification() {
                    code.push_str("this.");
                }
                code.push_str(&element.member().name);
            }
            ChainElementKind::Method => match style {
                CodeStyle::Title => code.push_str(&element.member().readable_name()),
                CodeStyle::Body => {
                    code.push_str(&element.member().name);
                    append_parameters(&mut code, element, &mut vars);
                }
            },
        }

        // Intermediate arrays must be indexed down to a single value before
        // the next dereference; the last one only down to the expected dimension.
        let keep = match style {
            CodeStyle::Title => 0,
            CodeStyle::Body if index == last => chain.expected_dimension(),
            CodeStyle::Body => 0,
        };
        for _ in keep..element.return_type_dimension() {
            match style {
                CodeStyle::Title => code.push_str("[]"),
                CodeStyle::Body => {
                    code.push('[');
                    code.push_str(&vars.next("i"));
                    code.push(']');
                }
            }
        }
        parts.push(code);
    }

    parts.join(".")
}

fn append_parameters(code: &mut String, element: &ChainElement, vars: &mut TemplateVariables) {
    let params: Vec<String> = element
        .member()
        .parameter_types()
        .map(|ty| vars.next(&parameter_variable_name(&ty.short_name())))
        .collect();
    code.push('(');
    code.push_str(&params.join(", "));
    code.push(')');
}

/// `List<String>` -> `list`, `String[]` -> `string`
fn parameter_variable_name(short_type_name: &str) -> String {
    let mut chars = short_type_name.chars();
    let name = match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect::<String>(),
        None => "arg".to_string(),
    };
    match name.find(['<', '[']) {
        Some(cut) => name[..cut].to_string(),
        None => name,
    }
}

/// Numbers repeated variable names: `${string}`, `${string2}`, ...
#[derive(Default)]
struct TemplateVariables {
    counts: HashMap<String, usize>,
}

impl TemplateVariables {
    fn next(&mut self, name: &str) -> String {
        let count = self.counts.entry(name.to_string()).or_insert(0);
        *count += 1;
        if *count > 1 {
            format!("${{{}{}}}", name, count)
        } else {
            format!("${{{}}}", name)
        }
    }
}
