//! Router bit model.
//!
//! A bit is described by its cutting width, depth of cut and dovetail angle.
//! Every other quantity used by the cut computations is derived from those
//! three values and recomputed in full whenever one of them changes.

use routerjig_core::{Fixed, ParameterError, ParameterResult, Units};
use tracing::debug;

/// A straight or dovetail router bit.
///
/// Widths and depths are whole increments. For a dovetail bit `width` is the
/// widest part of the cutter, which sits at the bottom of the cut.
#[derive(Debug, Clone, PartialEq)]
pub struct RouterBit {
    units: Units,
    width: i32,
    depth: i32,
    angle: f64,
    width_f: Fixed,
    midline: Fixed,
    overhang: Fixed,
    neck: Fixed,
    depth_0: Fixed,
}

impl RouterBit {
    /// Create a bit, validating all three dimensions.
    pub fn new(units: Units, width: i32, depth: i32, angle: f64) -> ParameterResult<Self> {
        check_width(width)?;
        check_depth(depth)?;
        check_angle(angle)?;
        let mut bit = Self {
            units,
            width,
            depth,
            angle,
            width_f: Fixed::ZERO,
            midline: Fixed::ZERO,
            overhang: Fixed::ZERO,
            neck: Fixed::ZERO,
            depth_0: Fixed::ZERO,
        };
        bit.reinit()?;
        Ok(bit)
    }

    /// Recompute every derived dimension.
    fn reinit(&mut self) -> ParameterResult<()> {
        self.width_f = Fixed::from(self.width);
        if self.angle > 0.0 {
            let tan = self.angle.to_radians().tan();
            let raw = Fixed::from_f64(self.width as f64 - self.depth as f64 * tan);
            self.midline = Fixed::from(raw.round_half_down());
        } else {
            self.midline = self.width_f;
        }
        let offset = self.width_f - self.midline;
        self.overhang = offset.half();
        self.neck = self.midline * 2 - self.width_f;
        self.depth_0 = if self.angle > 0.0 {
            Fixed::from_f64(offset.to_f64() / self.angle.to_radians().tan())
        } else {
            Fixed::from(self.depth)
        };

        if self.neck < Fixed::ONE {
            return Err(ParameterError::Incompatible(format!(
                "Bit angle and depth give a neck width of {} increments; \
                 reduce the angle or depth, or increase the width",
                self.neck
            )));
        }
        debug!(
            "Bit {}x{}@{}: midline {}, neck {}",
            self.width, self.depth, self.angle, self.midline, self.neck
        );
        Ok(())
    }

    /// Apply a change to a copy and keep it only if the derived geometry is valid.
    fn update(&mut self, change: impl FnOnce(&mut Self)) -> ParameterResult<()> {
        let mut next = self.clone();
        change(&mut next);
        next.reinit()?;
        *self = next;
        Ok(())
    }

    /// Set the cutting width in increments.
    pub fn set_width(&mut self, width: i32) -> ParameterResult<()> {
        check_width(width)?;
        self.update(|b| b.width = width)
    }

    /// Set the depth of cut in increments.
    pub fn set_depth(&mut self, depth: i32) -> ParameterResult<()> {
        check_depth(depth)?;
        self.update(|b| b.depth = depth)
    }

    /// Set the dovetail angle in degrees; 0 is a straight bit.
    pub fn set_angle(&mut self, angle: f64) -> ParameterResult<()> {
        check_angle(angle)?;
        self.update(|b| b.angle = angle)
    }

    /// Set the width from a user-entered length such as `1/2"`.
    pub fn set_width_from_string(&mut self, input: &str) -> ParameterResult<()> {
        let width = self.units.string_to_increments(input)?;
        self.set_width(width)
    }

    /// Set the depth from a user-entered length.
    pub fn set_depth_from_string(&mut self, input: &str) -> ParameterResult<()> {
        let depth = self.units.string_to_increments(input)?;
        self.set_depth(depth)
    }

    /// Set the angle from a user-entered number of degrees.
    pub fn set_angle_from_string(&mut self, input: &str) -> ParameterResult<()> {
        let angle = input
            .trim()
            .parse::<f64>()
            .map_err(|_| ParameterError::Unparsable {
                input: input.to_string(),
                expected: "angle".to_string(),
            })?;
        self.set_angle(angle)
    }

    pub fn units(&self) -> &Units {
        &self.units
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn depth(&self) -> i32 {
        self.depth
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Width as a fixed-point value.
    pub fn width_f(&self) -> Fixed {
        self.width_f
    }

    /// Width of the cut halfway up the bit, rounded to whole increments.
    pub fn midline(&self) -> Fixed {
        self.midline
    }

    /// How far the widest part of the bit extends past the midline on each side.
    pub fn overhang(&self) -> Fixed {
        self.overhang
    }

    /// Width of the cut at the board surface.
    pub fn neck(&self) -> Fixed {
        self.neck
    }

    /// Depth that would give a crisp dovetail for the rounded midline.
    pub fn depth_0(&self) -> Fixed {
        self.depth_0
    }

    /// Shift between a mating pair of cut boundaries: `width - midline`.
    ///
    /// This is also the horizontal run of a dovetail cut side between the
    /// board surface and the bottom of the cut.
    pub fn offset(&self) -> Fixed {
        self.width_f - self.midline
    }

    /// Horizontal run of a dovetail cut side over the full depth, as the bit
    /// actually cuts it. Differs from [`offset`](Self::offset) by the
    /// rounding of the midline.
    pub fn cut_run(&self) -> f64 {
        if self.depth_0 > Fixed::ZERO {
            self.offset().to_f64() * self.depth as f64 / self.depth_0.to_f64()
        } else {
            0.0
        }
    }

    /// Half of the bit width.
    pub fn halfwidth(&self) -> Fixed {
        self.width_f.half()
    }

    /// Largest amount of material a pass may leave or overcut.
    pub fn tolerance(&self) -> Fixed {
        self.units.tolerance()
    }

    pub fn is_dovetail(&self) -> bool {
        self.angle > 0.0
    }

    /// Short summary used in the joint title.
    pub fn description(&self) -> String {
        let kind = if self.is_dovetail() {
            format!("Dovetail {}\u{b0}", self.angle)
        } else {
            "Straight".to_string()
        };
        format!(
            "Bit: {}, Width: {}, Depth: {}",
            kind,
            self.units.increments_to_string(self.width, true),
            self.units.increments_to_string(self.depth, true)
        )
    }
}

fn check_width(width: i32) -> ParameterResult<()> {
    if width <= 0 {
        return Err(ParameterError::not_positive("Bit width", width as f64));
    }
    Ok(())
}

fn check_depth(depth: i32) -> ParameterResult<()> {
    if depth <= 0 {
        return Err(ParameterError::not_positive("Bit depth", depth as f64));
    }
    Ok(())
}

fn check_angle(angle: f64) -> ParameterResult<()> {
    if !(0.0..90.0).contains(&angle) {
        return Err(ParameterError::OutOfRange {
            name: "Bit angle".to_string(),
            value: angle,
            min: 0.0,
            max: 90.0,
        });
    }
    Ok(())
}
