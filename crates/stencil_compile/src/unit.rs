//! In-process representation of compiled units and live instances.

use std::sync::{Arc, OnceLock};

use regex::Regex;
use stencil_common::UnitName;

/// A compiled unit parsed back from its artifact text.
///
/// This is the registry-resident form: the unit header, its hoisted
/// imports, and the opaque body. The body's executable semantics belong to
/// the surrounding rendering runtime, not to this crate.
#[derive(Debug, Clone)]
pub struct CompiledUnit {
    /// The unit's generated name.
    pub name: UnitName,

    /// Name of the parent unit this unit inherits from, if any.
    pub parent: Option<String>,

    /// Hoisted import lines, in artifact order.
    pub imports: Vec<String>,

    /// The unit body between the header braces, opaque to this crate.
    pub body: String,
}

fn header_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)^unit\s+(\S+?)\s*(?::\s*([A-Za-z0-9_.:]+)\s*)?\{")
            .expect("unit header pattern is valid")
    })
}

impl CompiledUnit {
    /// Parses artifact text back into a compiled unit.
    ///
    /// Fail-safe: returns `None` for text that is not a well-formed
    /// artifact (no header, malformed name, or missing closing brace), so
    /// corrupt cache entries read as unloadable rather than panicking.
    pub fn from_source(text: &str) -> Option<Self> {
        let captures = header_pattern().captures(text)?;
        let name = UnitName::parse(captures.get(1)?.as_str())?;
        let parent = captures.get(2).map(|m| m.as_str().to_string());

        let header_end = captures.get(0)?.end();
        let close = text.rfind('}')?;
        if close < header_end {
            return None;
        }
        let body = text[header_end..close].trim().to_string();

        let imports = text[..captures.get(0)?.start()]
            .lines()
            .filter(|line| line.trim_start().starts_with("use "))
            .map(|line| line.to_string())
            .collect();

        Some(Self {
            name,
            parent,
            imports,
            body,
        })
    }
}

/// The opaque context objects forwarded to an activated unit.
///
/// The page, layout, and controller are owned by the rendering runtime and
/// passed through unchanged; this core never inspects them.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    /// The page object.
    pub page: serde_json::Value,

    /// The layout object.
    pub layout: serde_json::Value,

    /// The controller object.
    pub controller: serde_json::Value,
}

/// A live unit: a registry-resident compiled unit bound to its context.
#[derive(Debug, Clone)]
pub struct UnitInstance {
    /// The shared compiled unit.
    pub unit: Arc<CompiledUnit>,

    /// The context the unit was activated with.
    pub context: RenderContext,
}

impl UnitInstance {
    /// Binds a compiled unit to a render context.
    pub fn new(unit: Arc<CompiledUnit>, context: RenderContext) -> Self {
        Self { unit, context }
    }

    /// The name of the underlying unit.
    pub fn name(&self) -> &UnitName {
        &self.unit.name
    }
}
