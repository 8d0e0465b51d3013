//! Consent pane logo row.
//!
//! The consent pane shows the merchant's logos in a horizontal row separated
//! by ellipsis glyphs (`· · ·`), or Stripe's own mark when the merchant has no
//! logos. This module computes that arrangement; rendering is left to the host.

/// Horizontal spacing between elements of the row.
pub const ROW_SPACING: f64 = 3.0;

/// Width of the Stripe brand mark.
pub const STRIPE_LOGO_WIDTH: f64 = 60.0;

/// Height of the Stripe brand mark.
pub const STRIPE_LOGO_HEIGHT: f64 = 25.0;

/// Side length of a merchant logo.
pub const MERCHANT_LOGO_SIZE: f64 = 72.0;

/// Corner radius of a merchant logo.
pub const MERCHANT_LOGO_CORNER_RADIUS: f64 = 16.0;

/// A width and height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Size {
    /// Create a size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Rect {
    /// Create a rectangle.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Theme colours referenced by the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeColor {
    /// Brand text colour, used to tint the Stripe mark.
    TextBrand,
    /// Neutral border colour, used for the ellipsis dots.
    BorderNeutral,
}

/// One element of the logo row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoElement {
    /// Stripe's brand mark, drawn as a template image.
    StripeLogo,
    /// A merchant logo loaded from a URL, aspect-filled and clipped.
    MerchantLogo {
        /// Image URL.
        url: String,
    },
    /// Three dots separating two logos.
    Ellipsis,
}

impl LogoElement {
    /// Fixed size of the element.
    #[must_use]
    pub fn size(&self) -> Size {
        match self {
            Self::StripeLogo => Size::new(STRIPE_LOGO_WIDTH, STRIPE_LOGO_HEIGHT),
            Self::MerchantLogo { .. } => Size::new(MERCHANT_LOGO_SIZE, MERCHANT_LOGO_SIZE),
            Self::Ellipsis => EllipsisLayout::size(),
        }
    }

    /// Corner radius used to clip the element.
    #[must_use]
    pub fn corner_radius(&self) -> f64 {
        match self {
            Self::MerchantLogo { .. } => MERCHANT_LOGO_CORNER_RADIUS,
            Self::StripeLogo | Self::Ellipsis => 0.0,
        }
    }

    /// Tint applied to the element, if any.
    #[must_use]
    pub fn tint(&self) -> Option<ThemeColor> {
        match self {
            Self::StripeLogo => Some(ThemeColor::TextBrand),
            Self::Ellipsis => Some(EllipsisLayout::DOT_COLOR),
            Self::MerchantLogo { .. } => None,
        }
    }
}

/// The logo row of the consent pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsentLogoLayout {
    elements: Vec<LogoElement>,
}

impl ConsentLogoLayout {
    /// Arrange `merchant_logos` into a row.
    ///
    /// No logos yields the Stripe mark alone. Otherwise every logo is shown in
    /// order with an ellipsis between neighbours and none after the last.
    #[must_use]
    pub fn new<S: AsRef<str>>(merchant_logos: &[S]) -> Self {
        if merchant_logos.is_empty() {
            return Self {
                elements: vec![LogoElement::StripeLogo],
            };
        }

        let mut elements = Vec::with_capacity(merchant_logos.len() * 2 - 1);
        for (index, url) in merchant_logos.iter().enumerate() {
            if index > 0 {
                elements.push(LogoElement::Ellipsis);
            }
            elements.push(LogoElement::MerchantLogo {
                url: url.as_ref().to_string(),
            });
        }
        Self { elements }
    }

    /// Elements from left to right.
    #[must_use]
    pub fn elements(&self) -> &[LogoElement] {
        &self.elements
    }

    /// Size of the whole row: widths plus spacing, tallest height.
    #[must_use]
    pub fn intrinsic_size(&self) -> Size {
        let widths: f64 = self.elements.iter().map(|e| e.size().width).sum();
        let gaps = self.elements.len().saturating_sub(1);
        #[allow(clippy::cast_precision_loss)]
        let spacing = ROW_SPACING * gaps as f64;
        let height = self
            .elements
            .iter()
            .map(|e| e.size().height)
            .fold(0.0, f64::max);
        Size::new(widths + spacing, height)
    }

    /// Frame of every element, vertically centred in the row.
    #[must_use]
    pub fn frames(&self) -> Vec<Rect> {
        let row_height = self.intrinsic_size().height;
        let mut x = 0.0;
        self.elements
            .iter()
            .map(|element| {
                let size = element.size();
                let frame = Rect::new(x, (row_height - size.height) / 2.0, size.width, size.height);
                x += size.width + ROW_SPACING;
                frame
            })
            .collect()
    }
}

/// Geometry of the ellipsis glyph.
#[derive(Debug, Clone, Copy)]
pub struct EllipsisLayout;

impl EllipsisLayout {
    /// Diameter of each dot.
    pub const DOT_DIAMETER: f64 = 6.0;
    /// Gap between neighbouring dots.
    pub const DOT_SPACING: f64 = 4.0;
    /// Colour of the dots.
    pub const DOT_COLOR: ThemeColor = ThemeColor::BorderNeutral;

    /// Size of the glyph: three dots and two gaps wide, one dot tall.
    #[must_use]
    pub fn size() -> Size {
        Size::new(
            Self::DOT_DIAMETER * 3.0 + Self::DOT_SPACING * 2.0,
            Self::DOT_DIAMETER,
        )
    }

    /// Left, middle and right dot frames inside `bounds`.
    ///
    /// The outer dots hug the edges and the middle dot is centred, so the
    /// glyph stretches evenly if it is given more room.
    #[must_use]
    pub fn dot_frames(bounds: Size) -> [Rect; 3] {
        let d = Self::DOT_DIAMETER;
        let y = bounds.height / 2.0 - d / 2.0;
        [
            Rect::new(0.0, y, d, d),
            Rect::new(bounds.width / 2.0 - d / 2.0, y, d, d),
            Rect::new(bounds.width - d, y, d, d),
        ]
    }

    /// Corner radius that makes a dot of `width` round.
    #[must_use]
    pub fn dot_corner_radius(width: f64) -> f64 {
        width / 2.0
    }
}
