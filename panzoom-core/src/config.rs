use serde::Deserialize;

pub const DEFAULT_START_SCALE: f64 = 1.0;
pub const DEFAULT_MIN_SCALE: f64 = 0.1;
pub const DEFAULT_MAX_SCALE: f64 = 5.0;
/// Pointer/touch starts inside an element matching this selector never begin a pan.
pub const DEFAULT_EXCLUDE_SELECTOR: &str = ".panzoom-exclude";

/// Resolved controller configuration. Built from defaults plus a [`ConfigPatch`].
#[derive(Clone, Debug, PartialEq)]
pub struct PanZoomConfig {
    pub start_scale: f64,
    pub start_x: f64,
    pub start_y: f64,
    pub min_scale: f64,
    pub max_scale: f64,
    pub exclude_selector: String,
}

impl Default for PanZoomConfig {
    fn default() -> Self {
        Self {
            start_scale: DEFAULT_START_SCALE,
            start_x: 0.0,
            start_y: 0.0,
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
            exclude_selector: DEFAULT_EXCLUDE_SELECTOR.to_string(),
        }
    }
}

/// Partial options as they arrive from the host page (camelCase keys, every
/// field optional, `null` treated as absent).
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConfigPatch {
    pub start_scale: Option<f64>,
    pub start_x: Option<f64>,
    pub start_y: Option<f64>,
    pub min_scale: Option<f64>,
    pub max_scale: Option<f64>,
    pub exclude_selector: Option<String>,
}

impl ConfigPatch {
    /// Parse a JSON options object. `null` yields an empty patch.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let patch: Option<ConfigPatch> = serde_json::from_str(json)?;
        Ok(patch.unwrap_or_default())
    }
}

impl PanZoomConfig {
    pub fn from_patch(patch: &ConfigPatch) -> Self {
        let mut config = Self::default();
        config.merge(patch);
        config
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::from_patch(&ConfigPatch::from_json(json)?))
    }

    /// Shallow merge. Bounds must be finite and positive, offsets finite,
    /// the start scale finite and non-zero (it is raised to `min_scale` when
    /// used); anything else is ignored and the previous value kept.
    pub fn merge(&mut self, patch: &ConfigPatch) {
        merge_field(&mut self.start_scale, patch.start_scale, "startScale", |v| v.is_finite() && v != 0.0);
        merge_field(&mut self.start_x, patch.start_x, "startX", f64::is_finite);
        merge_field(&mut self.start_y, patch.start_y, "startY", f64::is_finite);
        merge_field(&mut self.min_scale, patch.min_scale, "minScale", is_valid_bound);
        merge_field(&mut self.max_scale, patch.max_scale, "maxScale", is_valid_bound);
        if let Some(sel) = &patch.exclude_selector {
            self.exclude_selector = sel.trim().to_string();
        }
    }
}

fn is_valid_bound(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

fn merge_field(slot: &mut f64, value: Option<f64>, name: &str, valid: impl Fn(f64) -> bool) {
    match value {
        Some(v) if valid(v) => *slot = v,
        Some(v) => log::warn!("ignoring {name} = {v}"),
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = PanZoomConfig::from_json("{}").unwrap();
        assert_eq!(c, PanZoomConfig::default());
        assert_eq!(c.start_scale, 1.0);
        assert_eq!(c.min_scale, 0.1);
        assert_eq!(c.max_scale, 5.0);
        assert_eq!(c.exclude_selector, ".panzoom-exclude");
    }

    #[test]
    fn test_null_options() {
        assert_eq!(PanZoomConfig::from_json("null").unwrap(), PanZoomConfig::default());
    }

    #[test]
    fn test_camel_case_fields() {
        let c = PanZoomConfig::from_json(
            r#"{"startScale":2,"startX":-30,"startY":12.5,"minScale":0.5,"maxScale":8,"excludeSelector":".memory-element"}"#,
        )
        .unwrap();
        assert_eq!(c.start_scale, 2.0);
        assert_eq!(c.start_x, -30.0);
        assert_eq!(c.start_y, 12.5);
        assert_eq!(c.min_scale, 0.5);
        assert_eq!(c.max_scale, 8.0);
        assert_eq!(c.exclude_selector, ".memory-element");
    }

    #[test]
    fn test_null_and_unknown_fields_are_ignored() {
        let c = PanZoomConfig::from_json(r#"{"startX":null,"contain":"outside"}"#).unwrap();
        assert_eq!(c.start_x, 0.0);
    }

    #[test]
    fn test_invalid_scales_keep_defaults() {
        let c = PanZoomConfig::from_json(r#"{"startScale":0,"maxScale":-2,"minScale":0}"#).unwrap();
        assert_eq!(c.start_scale, 1.0);
        assert_eq!(c.max_scale, 5.0);
        assert_eq!(c.min_scale, 0.1);
    }

    #[test]
    fn test_negative_start_scale_is_kept() {
        let c = PanZoomConfig::from_json(r#"{"startScale":-1}"#).unwrap();
        assert_eq!(c.start_scale, -1.0);
    }

    #[test]
    fn test_non_finite_offsets_keep_previous() {
        let mut c = PanZoomConfig { start_x: 3.0, start_y: 4.0, ..Default::default() };
        c.merge(&ConfigPatch {
            start_x: Some(f64::NAN),
            start_y: Some(f64::INFINITY),
            min_scale: Some(f64::NEG_INFINITY),
            ..Default::default()
        });
        assert_eq!((c.start_x, c.start_y), (3.0, 4.0));
        assert_eq!(c.min_scale, 0.1);
    }

    #[test]
    fn test_wrong_type_is_an_error() {
        assert!(PanZoomConfig::from_json(r#"{"maxScale":"big"}"#).is_err());
        assert!(PanZoomConfig::from_json("42").is_err());
    }

    #[test]
    fn test_merge_is_shallow() {
        let mut c = PanZoomConfig::default();
        c.merge(&ConfigPatch { max_scale: Some(3.0), ..Default::default() });
        assert_eq!(c.max_scale, 3.0);
        assert_eq!(c.start_scale, 1.0);
        assert_eq!(c.min_scale, 0.1);
    }
}
