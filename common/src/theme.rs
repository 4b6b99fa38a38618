//! Theme preset and CSS cascade-layer ordering.
//!
//! Later layers win on conflicting rules, so the component library layer is
//! always declared after `theme` and `base`.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

/// Name of the layer holding component library styles.
pub const COMPONENT_LIBRARY_LAYER: &str = "primitives";

/// Cascade layers, declared in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CssLayer {
    Theme,
    Base,
    ComponentLibrary,
}

impl CssLayer {
    pub const ALL: [CssLayer; 3] = [CssLayer::Theme, CssLayer::Base, CssLayer::ComponentLibrary];

    pub fn name(self) -> &'static str {
        match self {
            CssLayer::Theme => "theme",
            CssLayer::Base => "base",
            CssLayer::ComponentLibrary => COMPONENT_LIBRARY_LAYER,
        }
    }
}

/// Canonical layer order. Whatever order layers are collected in, the
/// declared order is `theme, base, primitives`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerOrder(Vec<CssLayer>);

impl LayerOrder {
    pub fn names(&self) -> Vec<&'static str> {
        self.0.iter().map(|l| l.name()).collect()
    }

    /// The `@layer` statement fixing precedence for the whole document.
    pub fn declaration(&self) -> String {
        format!("@layer {};", self.names().join(", "))
    }
}

impl Default for LayerOrder {
    fn default() -> Self {
        Self(CssLayer::ALL.to_vec())
    }
}

impl FromIterator<CssLayer> for LayerOrder {
    fn from_iter<I: IntoIterator<Item = CssLayer>>(iter: I) -> Self {
        let mut layers: Vec<CssLayer> = iter.into_iter().collect();
        layers.extend(CssLayer::ALL);
        layers.sort();
        layers.dedup();
        Self(layers)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ThemePreset {
    #[default]
    Aura,
}

impl ThemePreset {
    /// Design tokens emitted as custom properties in the `theme` layer.
    pub fn tokens(self) -> &'static [(&'static str, &'static str)] {
        match self {
            ThemePreset::Aura => &[
                ("--p-primary-color", "#10b981"),
                ("--p-primary-contrast-color", "#ffffff"),
                ("--p-primary-hover-color", "#059669"),
                ("--p-surface-0", "#ffffff"),
                ("--p-surface-50", "#f8fafc"),
                ("--p-surface-100", "#f1f5f9"),
                ("--p-surface-200", "#e2e8f0"),
                ("--p-surface-500", "#64748b"),
                ("--p-surface-700", "#334155"),
                ("--p-surface-900", "#0f172a"),
                ("--p-text-color", "#334155"),
                ("--p-text-muted-color", "#64748b"),
                ("--p-border-radius", "6px"),
                ("--p-focus-ring-color", "#10b981"),
                ("--p-success-color", "#16a34a"),
                ("--p-info-color", "#0284c7"),
                ("--p-warn-color", "#ca8a04"),
                ("--p-error-color", "#dc2626"),
                ("--p-font-family", "Inter, system-ui, sans-serif"),
            ],
        }
    }
}

const BASE_RULES: &str = "\
html, body, #app { height: 100%; margin: 0; }
body { font-family: var(--p-font-family); color: var(--p-text-color); background: var(--p-surface-50); }
*, *::before, *::after { box-sizing: border-box; }
a { color: var(--p-primary-color); }";

/// Theme engine settings registered on the application.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ThemeConfig {
    pub preset: ThemePreset,
    pub layers: LayerOrder,
}

impl ThemeConfig {
    pub fn new(preset: ThemePreset) -> Self {
        Self {
            preset,
            layers: LayerOrder::default(),
        }
    }

    /// Stylesheet with the layer declaration first, then the preset tokens and
    /// base rules inside their own layers.
    pub fn stylesheet(&self) -> String {
        let mut css = self.layers.declaration();
        css.push_str("\n@layer theme {\n  :root {\n");
        for (name, value) in self.preset.tokens() {
            let _ = writeln!(css, "    {name}: {value};");
        }
        css.push_str("  }\n}\n@layer base {\n");
        css.push_str(BASE_RULES);
        css.push_str("\n}\n");
        css
    }
}
