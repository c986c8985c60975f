//! Plugin traits for gencmd.
//!
//! A tool is assembled from two kinds of plugins, each registered under a
//! name that becomes a command-line option:
//!
//! - [`Generator`]: produces output from the loaded package roots.
//! - [`OutputRule`]: decides where a generator's files are written.
//!
//! Either kind may additionally provide help for its marker through
//! [`HasHelp`]. The capability is declared up front by choosing the
//! constructor ([`Plugin::new`] or [`Plugin::with_help`]), so the registrar
//! never has to probe a plugin at runtime.
//!
//! # Example
//!
//! ```ignore
//! use gencmd_core::prelude::*;
//!
//! struct Deepcopy;
//!
//! impl Generator for Deepcopy {
//!     fn generate(&self, ctx: &GenerationContext<'_>, _args: &MarkerArgs) -> Result<(), GenerateError> {
//!         for root in ctx.roots() {
//!             // ...
//!         }
//!         Ok(())
//!     }
//! }
//!
//! CmdBuilder::new("demo")
//!     .with_generator("deepcopy", GeneratorPlugin::new(Deepcopy))
//!     .apply()
//!     .run();
//! ```

use crate::engine::{GenerationContext, MarkerArgs, Root};
use crate::error::{GenerateError, RegistryError};
use crate::markers::{DefinitionHelp, FieldSpec, Registry};
use std::io::{self, Write};
use std::ops::Deref;
use std::sync::Arc;

// ── Generator ───────────────────────────────────────────────────────────────

/// A named unit of code generation.
pub trait Generator {
    /// Fields accepted on the command line, e.g. `year` in `obj:year=2024`.
    fn fields(&self) -> Vec<FieldSpec> {
        Vec::new()
    }

    /// Register the source markers this generator understands.
    ///
    /// Called when the generator is selected, both for marker listings
    /// (`-w`) and before generation.
    fn register_markers(&self, _into: &mut Registry) -> Result<(), RegistryError> {
        Ok(())
    }

    /// Run the generator over every root in `ctx`.
    ///
    /// Per-root problems should be attached with [`Root::add_error`] so that
    /// the remaining roots are still processed.
    fn generate(&self, ctx: &GenerationContext<'_>, args: &MarkerArgs) -> Result<(), GenerateError>;
}

// ── Output rule ─────────────────────────────────────────────────────────────

/// Decides where generated files go.
pub trait OutputRule {
    fn fields(&self) -> Vec<FieldSpec> {
        Vec::new()
    }

    /// Open `filename` for the given root.
    fn open(&self, args: &MarkerArgs, root: &Root, filename: &str) -> io::Result<Box<dyn Write>>;
}

// ── Help capability ─────────────────────────────────────────────────────────

/// Optional capability: describe the plugin's marker.
pub trait HasHelp {
    /// `None` or an empty help object means "nothing to attach".
    fn help(&self) -> Option<DefinitionHelp>;
}

// ── Plugin wrapper ──────────────────────────────────────────────────────────

/// A registered plugin, with or without the help capability.
pub enum Plugin<P: ?Sized> {
    Base(Arc<P>),
    WithHelp {
        plugin: Arc<P>,
        helper: Arc<dyn HasHelp>,
    },
}

pub type GeneratorPlugin = Plugin<dyn Generator>;
pub type OutputRulePlugin = Plugin<dyn OutputRule>;

impl<P: ?Sized> Clone for Plugin<P> {
    fn clone(&self) -> Self {
        match self {
            Plugin::Base(plugin) => Plugin::Base(Arc::clone(plugin)),
            Plugin::WithHelp { plugin, helper } => Plugin::WithHelp {
                plugin: Arc::clone(plugin),
                helper: Arc::clone(helper),
            },
        }
    }
}

impl<P: ?Sized> Plugin<P> {
    pub fn plugin(&self) -> &Arc<P> {
        match self {
            Plugin::Base(plugin) | Plugin::WithHelp { plugin, .. } => plugin,
        }
    }

    /// Help to attach to the plugin's marker, if it has a non-empty one.
    pub fn help(&self) -> Option<DefinitionHelp> {
        match self {
            Plugin::Base(_) => None,
            Plugin::WithHelp { helper, .. } => helper.help().filter(|h| !h.is_empty()),
        }
    }

    pub fn has_help(&self) -> bool {
        matches!(self, Plugin::WithHelp { .. })
    }
}

impl<P: ?Sized> Deref for Plugin<P> {
    type Target = P;

    fn deref(&self) -> &P {
        self.plugin()
    }
}

impl Plugin<dyn Generator> {
    pub fn new<G: Generator + 'static>(generator: G) -> Self {
        Plugin::Base(Arc::new(generator))
    }

    pub fn with_help<G: Generator + HasHelp + 'static>(generator: G) -> Self {
        let generator = Arc::new(generator);
        Plugin::WithHelp {
            plugin: generator.clone(),
            helper: generator,
        }
    }
}

impl Plugin<dyn OutputRule> {
    pub fn new<R: OutputRule + 'static>(rule: R) -> Self {
        Plugin::Base(Arc::new(rule))
    }

    pub fn with_help<R: OutputRule + HasHelp + 'static>(rule: R) -> Self {
        let rule = Arc::new(rule);
        Plugin::WithHelp {
            plugin: rule.clone(),
            helper: rule,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Plain;

    impl Generator for Plain {
        fn generate(&self, _ctx: &GenerationContext<'_>, _args: &MarkerArgs) -> Result<(), GenerateError> {
            Ok(())
        }
    }

    struct Helpful(Option<DefinitionHelp>);

    impl Generator for Helpful {
        fn generate(&self, _ctx: &GenerationContext<'_>, _args: &MarkerArgs) -> Result<(), GenerateError> {
            Ok(())
        }
    }

    impl HasHelp for Helpful {
        fn help(&self) -> Option<DefinitionHelp> {
            self.0.clone()
        }
    }

    #[test]
    fn base_plugin_has_no_help() {
        let plugin = GeneratorPlugin::new(Plain);
        assert!(!plugin.has_help());
        assert!(plugin.help().is_none());
    }

    #[test]
    fn help_capability_is_exposed() {
        let plugin = GeneratorPlugin::with_help(Helpful(Some(DefinitionHelp::simple("object", "objects"))));
        assert!(plugin.has_help());
        assert_eq!(plugin.help().unwrap().category, "object");
    }

    #[test]
    fn empty_help_is_dropped() {
        let plugin = GeneratorPlugin::with_help(Helpful(Some(DefinitionHelp::default())));
        assert!(plugin.help().is_none());
        let plugin = GeneratorPlugin::with_help(Helpful(None));
        assert!(plugin.help().is_none());
    }

    #[test]
    fn clones_share_the_plugin() {
        let plugin = GeneratorPlugin::new(Plain);
        let copy = plugin.clone();
        assert!(Arc::ptr_eq(plugin.plugin(), copy.plugin()));
    }
}
