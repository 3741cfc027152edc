//! Default design tokens.

use super::{FontStyle, ThemeBreakpoints, ThemeColors, ThemeShadows, ThemeSpacing, ThemeTypography};

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            surface: "var(--joy-palette-background-surface, #ffffff)".into(),
            surface_hover: "var(--joy-palette-background-level1, #f7f7f8)".into(),
            surface_selected: "var(--joy-palette-primary-50, #e3f2fd)".into(),
            border: "var(--joy-palette-divider, #e0e0e0)".into(),
            text: "var(--joy-palette-text-primary, #000000)".into(),
            text_secondary: "var(--joy-palette-text-secondary, #666666)".into(),
            primary: "var(--joy-palette-primary-500, #1976d2)".into(),
            success: "var(--joy-palette-success-500, #2e7d32)".into(),
            danger: "var(--joy-palette-danger-500, #d32f2f)".into(),
            warning: "var(--joy-palette-warning-500, #ed6c02)".into(),
        }
    }
}

impl Default for ThemeSpacing {
    fn default() -> Self {
        Self {
            xs: "var(--joy-spacing-1, 4px)".into(),
            sm: "var(--joy-spacing-2, 8px)".into(),
            md: "var(--joy-spacing-3, 12px)".into(),
            lg: "var(--joy-spacing-4, 16px)".into(),
            xl: "var(--joy-spacing-6, 24px)".into(),
        }
    }
}

impl Default for ThemeTypography {
    fn default() -> Self {
        Self {
            header: FontStyle {
                font_size: "var(--joy-fontSize-sm, 14px)".into(),
                font_weight: "var(--joy-fontWeight-md, 500)".into(),
            },
            body: FontStyle {
                font_size: "var(--joy-fontSize-sm, 14px)".into(),
                font_weight: "var(--joy-fontWeight-md, 400)".into(),
            },
        }
    }
}

impl Default for ThemeShadows {
    fn default() -> Self {
        Self {
            sm: "var(--joy-shadow-sm, 0 1px 2px 0 rgba(0, 0, 0, 0.05))".into(),
            md: "var(--joy-shadow-md, 0 1px 3px 0 rgba(0, 0, 0, 0.1), 0 1px 2px 0 rgba(0, 0, 0, 0.06))".into(),
            lg: "var(--joy-shadow-lg, 0 4px 6px -1px rgba(0, 0, 0, 0.1), 0 2px 4px -1px rgba(0, 0, 0, 0.06))".into(),
        }
    }
}

impl Default for ThemeBreakpoints {
    fn default() -> Self {
        Self {
            mobile: "768px".into(),
            tablet: "1024px".into(),
            desktop: "1200px".into(),
        }
    }
}
