// THEORY:
// The `Pixel` module is the smallest unit of the converter. A `Pixel` is a
// "dumb" RGBA container read out of a decoded track image, and `BorderColor`
// is the RGB asphalt color the border detector hunts for.
//
// Key principles:
// 1.  **Single-pixel scope**: matching a pixel against the border color never
//     looks at neighbors. Row scanning lives in `border_detector`.
// 2.  **Strict tolerance**: a channel matches only when its distance to the
//     target is strictly below the tolerance. A distance equal to the
//     tolerance is a miss.
// 3.  **Alpha is ignored** for matching. Transparent asphalt is still asphalt.

pub mod pixel {
    use serde::Deserialize;
    use std::fmt;
    use std::str::FromStr;

    pub type Channel = u8;
    pub type Tolerance = u8;

    /// A "dumb" data container representing a single RGBA pixel.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Pixel {
        /// The red channel value (0-255).
        pub red: Channel,
        /// The green channel value (0-255).
        pub green: Channel,
        /// The blue channel value (0-255).
        pub blue: Channel,
        /// The alpha (transparency) channel value (0-255).
        pub alpha: Channel,
    }

    impl Pixel {
        pub fn new(red: Channel, green: Channel, blue: Channel, alpha: Channel) -> Self {
            Pixel {
                red,
                green,
                blue,
                alpha,
            }
        }

        /// True when red, green and blue are each strictly within `tolerance`
        /// of `target`.
        #[inline]
        pub fn matches(&self, target: &BorderColor, tolerance: Tolerance) -> bool {
            channel_within(self.red, target.red, tolerance)
                && channel_within(self.green, target.green, tolerance)
                && channel_within(self.blue, target.blue, tolerance)
        }
    }

    #[inline]
    fn channel_within(sample: Channel, target: Channel, tolerance: Tolerance) -> bool {
        sample.abs_diff(target) < tolerance
    }

    impl From<&image::Rgba<u8>> for Pixel {
        fn from(rgba: &image::Rgba<u8>) -> Self {
            let [red, green, blue, alpha] = rgba.0;
            Pixel::new(red, green, blue, alpha)
        }
    }

    /// The RGB color of the road border (asphalt).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
    #[serde(from = "[Channel; 3]")]
    pub struct BorderColor {
        pub red: Channel,
        pub green: Channel,
        pub blue: Channel,
    }

    impl BorderColor {
        pub const ASPHALT: BorderColor = BorderColor::new(153, 153, 153);

        pub const fn new(red: Channel, green: Channel, blue: Channel) -> Self {
            Self { red, green, blue }
        }
    }

    impl Default for BorderColor {
        fn default() -> Self {
            Self::ASPHALT
        }
    }

    impl From<[Channel; 3]> for BorderColor {
        fn from([red, green, blue]: [Channel; 3]) -> Self {
            Self::new(red, green, blue)
        }
    }

    impl fmt::Display for BorderColor {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{},{},{}", self.red, self.green, self.blue)
        }
    }

    /// Parses `"R,G,B"`, e.g. `"153,153,153"`.
    impl FromStr for BorderColor {
        type Err = String;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            let channels = s
                .split(',')
                .map(|part| part.trim().parse::<Channel>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| format!("invalid color channel in {s:?}: {e}"))?;

            match channels.as_slice() {
                [red, green, blue] => Ok(Self::new(*red, *green, *blue)),
                _ => Err(format!(
                    "expected three comma separated channels, got {}",
                    channels.len()
                )),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::pixel::*;

    #[test]
    fn exact_color_matches() {
        let pixel = Pixel::new(153, 153, 153, 255);
        assert!(pixel.matches(&BorderColor::ASPHALT, 20));
    }

    #[test]
    fn distance_equal_to_tolerance_is_a_miss() {
        let target = BorderColor::ASPHALT;
        assert!(!Pixel::new(173, 153, 153, 255).matches(&target, 20));
        assert!(!Pixel::new(153, 133, 153, 255).matches(&target, 20));
        assert!(!Pixel::new(153, 153, 173, 255).matches(&target, 20));

        assert!(Pixel::new(172, 134, 172, 255).matches(&target, 20));
    }

    #[test]
    fn alpha_does_not_affect_matching() {
        assert!(Pixel::new(150, 160, 140, 0).matches(&BorderColor::ASPHALT, 20));
    }

    #[test]
    fn single_channel_out_of_range_rejects() {
        assert!(!Pixel::new(153, 153, 0, 255).matches(&BorderColor::ASPHALT, 20));
    }

    #[test]
    fn pixel_from_rgba_keeps_channel_order() {
        let rgba = image::Rgba([1, 2, 3, 4]);
        assert_eq!(Pixel::from(&rgba), Pixel::new(1, 2, 3, 4));
    }

    #[test]
    fn border_color_parses_from_str() {
        assert_eq!(
            "10, 20,30".parse::<BorderColor>(),
            Ok(BorderColor::new(10, 20, 30))
        );
        assert!("10,20".parse::<BorderColor>().is_err());
        assert!("10,20,300".parse::<BorderColor>().is_err());
        assert_eq!(BorderColor::default().to_string(), "153,153,153");
    }
}
