//! Extrusion parameters and presets.

use crate::error::{VoxelError, VoxelResult};

/// Physical dimensions used when extruding a raster. All values are in mm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtrusionParams {
    /// Height of each voxel above the base plate.
    pub extrusion_height: f64,

    /// Thickness of the base plate under the voxels.
    pub base_thickness: f64,

    /// Edge length of one raster cell in X and Y.
    pub cell_size: f64,
}

impl Default for ExtrusionParams {
    fn default() -> Self {
        Self {
            extrusion_height: 2.0,
            base_thickness: 1.0,
            cell_size: 1.5,
        }
    }
}

impl ExtrusionParams {
    /// Create parameters from explicit values.
    #[must_use]
    pub const fn new(extrusion_height: f64, base_thickness: f64, cell_size: f64) -> Self {
        Self {
            extrusion_height,
            base_thickness,
            cell_size,
        }
    }

    /// Keychain-sized relief: thin plate, short voxels.
    ///
    /// Uses 1.0mm voxels on a 0.6mm plate with 1.0mm cells.
    #[must_use]
    pub const fn keychain() -> Self {
        Self::new(1.0, 0.6, 1.0)
    }

    /// Wall-art relief: tall voxels on a stiff plate with large cells.
    ///
    /// Uses 4.0mm voxels on a 2.0mm plate with 3.0mm cells.
    #[must_use]
    pub const fn wall_art() -> Self {
        Self::new(4.0, 2.0, 3.0)
    }

    /// Set extrusion height.
    #[must_use]
    pub const fn with_extrusion_height(mut self, height: f64) -> Self {
        self.extrusion_height = height;
        self
    }

    /// Set base plate thickness.
    #[must_use]
    pub const fn with_base_thickness(mut self, thickness: f64) -> Self {
        self.base_thickness = thickness;
        self
    }

    /// Set cell size.
    #[must_use]
    pub const fn with_cell_size(mut self, size: f64) -> Self {
        self.cell_size = size;
        self
    }

    /// Total model height: plate plus voxels.
    #[must_use]
    pub fn total_height(&self) -> f64 {
        self.extrusion_height + self.base_thickness
    }

    /// Check that every dimension is a positive finite number.
    ///
    /// # Errors
    ///
    /// Returns [`VoxelError::InvalidParameter`] naming the first bad value.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_voxel::ExtrusionParams;
    ///
    /// assert!(ExtrusionParams::default().validate().is_ok());
    /// assert!(ExtrusionParams::default().with_cell_size(0.0).validate().is_err());
    /// ```
    pub fn validate(&self) -> VoxelResult<()> {
        for (name, value) in [
            ("extrusion_height", self.extrusion_height),
            ("base_thickness", self.base_thickness),
            ("cell_size", self.cell_size),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(VoxelError::InvalidParameter { name, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = ExtrusionParams::default();
        assert!((params.extrusion_height - 2.0).abs() < 1e-12);
        assert!((params.base_thickness - 1.0).abs() < 1e-12);
        assert!((params.cell_size - 1.5).abs() < 1e-12);
        assert!((params.total_height() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(ExtrusionParams::keychain().validate().is_ok());
        assert!(ExtrusionParams::wall_art().validate().is_ok());
        assert!(ExtrusionParams::keychain().extrusion_height < ExtrusionParams::wall_art().extrusion_height);
    }

    #[test]
    fn test_builders() {
        let params = ExtrusionParams::default()
            .with_extrusion_height(3.0)
            .with_base_thickness(0.5)
            .with_cell_size(2.0);
        assert_eq!(params, ExtrusionParams::new(3.0, 0.5, 2.0));
    }

    #[test]
    fn test_validate_names_first_bad_value() {
        let err = ExtrusionParams::new(-1.0, f64::NAN, 0.0).validate();
        assert!(matches!(
            err,
            Err(VoxelError::InvalidParameter { name: "extrusion_height", .. })
        ));

        let err = ExtrusionParams::default().with_base_thickness(f64::INFINITY).validate();
        assert!(matches!(
            err,
            Err(VoxelError::InvalidParameter { name: "base_thickness", .. })
        ));
    }
}
