//! Rendered markup and the sanitization seam.
//!
//! The renderer passes raw HTML in the source through untouched, so its output
//! is only as trustworthy as its input. [`Markup`] makes the caller decide:
//! run it through a [`Sanitizer`], or explicitly declare the source trusted.

/// Sanitizes rendered HTML before it reaches a display surface.
pub trait Sanitizer {
    /// Return a sanitized copy of `html`.
    fn sanitize(&self, html: &str) -> String;
}

impl<F> Sanitizer for F
where
    F: Fn(&str) -> String,
{
    fn sanitize(&self, html: &str) -> String {
        self(html)
    }
}

/// Rendered markup that has not been sanitized.
///
/// There is intentionally no `Display` or `Deref<Target = str>`: getting a
/// string out requires either [`sanitize`](Self::sanitize) or
/// [`into_trusted_string`](Self::into_trusted_string).
#[must_use]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Markup(String);

impl Markup {
    pub(crate) fn new(html: String) -> Self {
        Self(html)
    }

    /// Sanitize the markup for display.
    #[must_use]
    pub fn sanitize<S: Sanitizer + ?Sized>(&self, sanitizer: &S) -> String {
        sanitizer.sanitize(&self.0)
    }

    /// Skip sanitization because the source text is trusted.
    #[must_use]
    pub fn into_trusted_string(self) -> String {
        self.0
    }

    /// Borrow the unsanitized markup for inspection.
    #[must_use]
    pub fn as_unsanitized_str(&self) -> &str {
        &self.0
    }

    /// Whether rendering produced no markup at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Allowlist sanitizer backed by [`ammonia`].
///
/// Keeps the elements the renderer emits, plus `target` on links, `style` on
/// table cells and `class` on code elements. Links always get
/// `rel="noopener noreferrer"`.
#[cfg(feature = "ammonia")]
pub struct AmmoniaSanitizer {
    builder: ammonia::Builder<'static>,
}

#[cfg(feature = "ammonia")]
impl AmmoniaSanitizer {
    /// Create a sanitizer with the renderer's allowlist.
    #[must_use]
    pub fn new() -> Self {
        let mut builder = ammonia::Builder::default();
        builder
            .add_tag_attributes("a", &["target"][..])
            .add_tag_attributes("th", &["style"][..])
            .add_tag_attributes("td", &["style"][..])
            .add_tag_attributes("code", &["class"][..]);
        Self { builder }
    }
}

#[cfg(feature = "ammonia")]
impl Default for AmmoniaSanitizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "ammonia")]
impl Sanitizer for AmmoniaSanitizer {
    fn sanitize(&self, html: &str) -> String {
        self.builder.clean(html).to_string()
    }
}
