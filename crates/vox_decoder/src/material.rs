//! # Materials
//!
//! Per-palette-index rendering parameters. Two encodings feed the same
//! representation:
//!
//! - `MATL`: key/value dictionary (`_type`, `_rough`, `_ior`, ...)
//! - `MATT`: legacy fixed record (type + single weight)
//!
//! A numeric value is only meaningful when its field is in the material's
//! [`FieldMask`]; [`Material::get`] enforces that.

use crate::error::{DecodeError, DecodeResult};
use crate::format::LegacyMaterialRecord;
use crate::palette::PALETTE_SIZE;

/// Material type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MaterialKind {
    /// Plain diffuse surface.
    #[default]
    Diffuse = 0,
    /// Metallic surface.
    Metal = 1,
    /// Transparent/refractive.
    Glass = 2,
    /// Emissive.
    Emit = 3,
    /// Blend material.
    Blend = 4,
    /// Participating media (cloud, fog).
    Media = 5,
}

impl MaterialKind {
    /// Maps a `MATL` `_type` value. Only the four basic type names are
    /// recognized; anything else returns `None`.
    #[must_use]
    pub fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "_diffuse" => Some(Self::Diffuse),
            "_metal" => Some(Self::Metal),
            "_glass" => Some(Self::Glass),
            "_emit" => Some(Self::Emit),
            _ => None,
        }
    }
}

/// Numeric material property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MaterialField {
    /// Metalness.
    Metal = 0,
    /// Roughness.
    Rough = 1,
    /// Specular.
    Spec = 2,
    /// Index of refraction.
    Ior = 3,
    /// Attenuation.
    Att = 4,
    /// Radiant flux.
    Flux = 5,
    /// Emission.
    Emit = 6,
    /// Low dynamic range.
    Ldr = 7,
    /// Transparency.
    Trans = 8,
    /// Alpha.
    Alpha = 9,
    /// Density.
    D = 10,
    /// Specular power.
    Sp = 11,
    /// Phase function asymmetry.
    G = 12,
    /// Media type.
    Media = 13,
}

impl MaterialField {
    /// Number of fields.
    pub const COUNT: usize = 14;

    /// All fields in slot order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Metal,
        Self::Rough,
        Self::Spec,
        Self::Ior,
        Self::Att,
        Self::Flux,
        Self::Emit,
        Self::Ldr,
        Self::Trans,
        Self::Alpha,
        Self::D,
        Self::Sp,
        Self::G,
        Self::Media,
    ];

    /// `MATL` dictionary key for this field.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Metal => "_metal",
            Self::Rough => "_rough",
            Self::Spec => "_spec",
            Self::Ior => "_ior",
            Self::Att => "_att",
            Self::Flux => "_flux",
            Self::Emit => "_emit",
            Self::Ldr => "_ldr",
            Self::Trans => "_trans",
            Self::Alpha => "_alpha",
            Self::D => "_d",
            Self::Sp => "_sp",
            Self::G => "_g",
            Self::Media => "_media",
        }
    }

    /// Looks up a field by its `MATL` key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }

    /// Slot in the value array.
    #[inline]
    #[must_use]
    pub const fn slot(self) -> usize {
        self as usize
    }
}

/// Set of explicitly assigned material fields.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FieldMask(u16);

impl FieldMask {
    /// Empty set.
    pub const EMPTY: Self = Self(0);

    /// Adds a field.
    #[inline]
    pub fn insert(&mut self, field: MaterialField) {
        self.0 |= 1 << field.slot();
    }

    /// Membership test.
    #[inline]
    #[must_use]
    pub const fn contains(self, field: MaterialField) -> bool {
        self.0 & (1 << field.slot()) != 0
    }

    /// Returns true if no field is assigned.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of assigned fields.
    #[inline]
    #[must_use]
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// Raw bits, one per [`MaterialField`] slot.
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Iterates assigned fields in slot order.
    pub fn iter(self) -> impl Iterator<Item = MaterialField> {
        MaterialField::ALL.into_iter().filter(move |&field| self.contains(field))
    }
}

/// Material for one palette index.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Material {
    /// Material type.
    pub kind: MaterialKind,
    assigned: FieldMask,
    values: [f32; MaterialField::COUNT],
}

impl Material {
    /// Diffuse material with nothing assigned.
    pub const DEFAULT: Self = Self {
        kind: MaterialKind::Diffuse,
        assigned: FieldMask::EMPTY,
        values: [0.0; MaterialField::COUNT],
    };

    /// Creates an empty material of the given type.
    #[must_use]
    pub const fn new(kind: MaterialKind) -> Self {
        Self { kind, ..Self::DEFAULT }
    }

    /// Assigns a field value.
    #[inline]
    pub fn set(&mut self, field: MaterialField, value: f32) {
        self.values[field.slot()] = value;
        self.assigned.insert(field);
    }

    /// Builder form of [`Material::set`].
    #[must_use]
    pub fn with(mut self, field: MaterialField, value: f32) -> Self {
        self.set(field, value);
        self
    }

    /// Value of a field, if it was assigned.
    #[inline]
    #[must_use]
    pub const fn get(&self, field: MaterialField) -> Option<f32> {
        if self.assigned.contains(field) {
            Some(self.values[field.slot()])
        } else {
            None
        }
    }

    /// Returns true if `field` was assigned.
    #[inline]
    #[must_use]
    pub const fn is_assigned(&self, field: MaterialField) -> bool {
        self.assigned.contains(field)
    }

    /// The assigned-field set.
    #[inline]
    #[must_use]
    pub const fn assigned(&self) -> FieldMask {
        self.assigned
    }

    /// Assigned fields paired with their values.
    pub fn assigned_fields(&self) -> impl Iterator<Item = (MaterialField, f32)> + '_ {
        self.assigned.iter().map(|field| (field, self.values[field.slot()]))
    }

    /// Returns true if this material carries no information beyond the default.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.kind == MaterialKind::Diffuse && self.assigned.is_empty()
    }

    /// Applies one `MATL` key/value pair.
    ///
    /// Returns `Ok(false)` for keys this decoder does not know; the caller
    /// has already consumed the pair so ignoring it is safe.
    ///
    /// # Errors
    ///
    /// Returns `BadNumericField` if a known numeric key holds text that is
    /// not a finite float. Surrounding whitespace, `NaN` and infinities are
    /// all rejected.
    pub fn apply_property(&mut self, key: &str, value: &str) -> DecodeResult<bool> {
        if key == "_type" {
            match MaterialKind::from_type_name(value) {
                Some(kind) => self.kind = kind,
                None => tracing::trace!("Unrecognized material type {:?}, keeping {:?}", value, self.kind),
            }
            return Ok(true);
        }

        let Some(field) = MaterialField::from_key(key) else {
            return Ok(false);
        };
        let parsed = value.parse::<f32>().ok().filter(|v| v.is_finite());
        let Some(parsed) = parsed else {
            return Err(DecodeError::BadNumericField {
                key: key.to_string(),
                value: value.to_string(),
            });
        };
        self.set(field, parsed);
        Ok(true)
    }

    /// Converts a legacy `MATT` record. The weight lands in the one field its
    /// type uses; other types keep only the default.
    #[must_use]
    pub fn from_legacy(record: &LegacyMaterialRecord) -> Self {
        let weight = record.weight();
        match record.kind() {
            LegacyMaterialRecord::TYPE_METAL => Self::new(MaterialKind::Metal).with(MaterialField::Metal, weight),
            LegacyMaterialRecord::TYPE_GLASS => Self::new(MaterialKind::Glass).with(MaterialField::Trans, weight),
            LegacyMaterialRecord::TYPE_EMIT => Self::new(MaterialKind::Emit).with(MaterialField::Emit, weight),
            _ => Self::DEFAULT,
        }
    }
}

/// Materials indexed like the palette.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialTable {
    entries: [Material; PALETTE_SIZE],
}

impl Default for MaterialTable {
    fn default() -> Self {
        Self { entries: [Material::DEFAULT; PALETTE_SIZE] }
    }
}

impl MaterialTable {
    /// Material at a palette index.
    #[inline]
    #[must_use]
    pub fn get(&self, index: u8) -> &Material {
        &self.entries[usize::from(index)]
    }

    /// Replaces the material at `index`.
    #[inline]
    pub fn set(&mut self, index: u8, material: Material) {
        self.entries[usize::from(index)] = material;
    }

    /// All entries in index order.
    #[inline]
    #[must_use]
    pub const fn entries(&self) -> &[Material; PALETTE_SIZE] {
        &self.entries
    }

    /// Slots carrying a non-default material.
    pub fn iter_assigned(&self) -> impl Iterator<Item = (u8, &Material)> + '_ {
        (0..=u8::MAX)
            .zip(self.entries.iter())
            .filter(|(_, material)| !material.is_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_keys_round_trip() {
        for field in MaterialField::ALL {
            assert_eq!(MaterialField::from_key(field.key()), Some(field));
        }
        assert_eq!(MaterialField::from_key("_type"), None);
        assert_eq!(MaterialField::from_key("_plastic"), None);
    }

    #[test]
    fn test_field_mask() {
        let mut mask = FieldMask::default();
        assert!(mask.is_empty());
        mask.insert(MaterialField::Rough);
        mask.insert(MaterialField::Media);
        mask.insert(MaterialField::Rough);
        assert!(mask.contains(MaterialField::Rough));
        assert!(mask.contains(MaterialField::Media));
        assert!(!mask.contains(MaterialField::Metal));
        assert_eq!(mask.len(), 2);
        assert_eq!(mask.iter().collect::<Vec<_>>(), vec![MaterialField::Rough, MaterialField::Media]);
    }

    #[test]
    fn test_get_requires_assignment() {
        let material = Material::new(MaterialKind::Metal).with(MaterialField::Rough, 0.5);
        assert_eq!(material.get(MaterialField::Rough), Some(0.5));
        assert_eq!(material.get(MaterialField::Metal), None);
        assert!(!material.is_default());
    }

    #[test]
    fn test_apply_property() {
        let mut material = Material::DEFAULT;
        assert!(material.apply_property("_type", "_glass").unwrap());
        assert!(material.apply_property("_ior", "0.3").unwrap());
        assert!(!material.apply_property("_plastic", "1").unwrap());
        assert_eq!(material.kind, MaterialKind::Glass);
        assert_eq!(material.get(MaterialField::Ior), Some(0.3));
        assert_eq!(material.assigned().len(), 1);
    }

    #[test]
    fn test_unknown_type_keeps_diffuse() {
        let mut material = Material::DEFAULT;
        material.apply_property("_type", "_media").unwrap();
        assert_eq!(material.kind, MaterialKind::Diffuse);
    }

    #[test]
    fn test_bad_numeric_value() {
        let mut material = Material::DEFAULT;
        let err = material.apply_property("_rough", "very").unwrap_err();
        match err {
            DecodeError::BadNumericField { key, value } => {
                assert_eq!(key, "_rough");
                assert_eq!(value, "very");
            }
            other => panic!("Expected BadNumericField, got {other:?}"),
        }
    }

    #[test]
    fn test_non_finite_and_padded_values_rejected() {
        for text in ["NaN", "inf", "-infinity", " 0.5 ", "0.5\n", ""] {
            let mut material = Material::DEFAULT;
            let err = material.apply_property("_alpha", text).unwrap_err();
            assert!(matches!(err, DecodeError::BadNumericField { .. }), "{text:?}");
            assert!(material.assigned().is_empty());
        }

        let mut material = Material::DEFAULT;
        material.apply_property("_alpha", "-1e-3").unwrap();
        assert_eq!(material.get(MaterialField::Alpha), Some(-1e-3));
    }

    #[test]
    fn test_table_iter_assigned() {
        let mut table = MaterialTable::default();
        table.set(3, Material::new(MaterialKind::Emit));
        table.set(200, Material::DEFAULT.with(MaterialField::Alpha, 0.1));
        let slots: Vec<u8> = table.iter_assigned().map(|(index, _)| index).collect();
        assert_eq!(slots, vec![3, 200]);
        assert_eq!(table.get(3).kind, MaterialKind::Emit);
    }
}
