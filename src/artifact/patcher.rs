//! In-place rewriting of version macros in the generated config header
//!
//! The artifact is treated as opaque text with six well-known scalar fields
//! embedded via a fixed macro grammar:
//!
//! ```text
//! #define VERSION_MAJOR 1
//! #define VERSION_MINOR 0
//! #define VERSION_PATCH 0
//! #define VERSION_BUILD 3
//! #define VERSION_STRING "v1.0.0.3"
//! #define BUILD_DATE "01/01/2020"
//! ```
//!
//! Only the six payloads change, each at its first occurrence; every other
//! byte of the artifact is preserved. A recognized macro that is absent
//! fails loudly with `MacroNotFound` instead of silently skipping.

use crate::changelog::Version;
use crate::core::error::{ArtifactError, ReleaseError, ReleaseResult};
use chrono::NaiveDate;
use regex::Regex;

/// Patches the version and build-date macros of a config header
pub struct ConfigPatcher {
  major_re: Regex,
  minor_re: Regex,
  patch_re: Regex,
  build_re: Regex,
  string_re: Regex,
  date_re: Regex,
}

impl ConfigPatcher {
  pub fn new() -> ReleaseResult<Self> {
    Ok(Self {
      major_re: Regex::new(r"#define\s+VERSION_MAJOR\s+(\d+)")?,
      minor_re: Regex::new(r"#define\s+VERSION_MINOR\s+(\d+)")?,
      patch_re: Regex::new(r"#define\s+VERSION_PATCH\s+(\d+)")?,
      build_re: Regex::new(r"#define\s+VERSION_BUILD\s+(\d+)")?,
      string_re: Regex::new(r#"#define\s+VERSION_STRING\s+"(v[\d.]+)""#)?,
      date_re: Regex::new(r#"#define\s+BUILD_DATE\s+"([\d/]+)""#)?,
    })
  }

  /// Apply `version` and `build_date` to the artifact text.
  ///
  /// Pure text-to-text: the caller owns reading and writing the file.
  pub fn apply(&self, text: &str, version: &Version, build_date: NaiveDate) -> ReleaseResult<String> {
    let mut patched = replace_payload(text, &self.major_re, "VERSION_MAJOR", &version.major.to_string())?;
    patched = replace_payload(&patched, &self.minor_re, "VERSION_MINOR", &version.minor.to_string())?;
    patched = replace_payload(&patched, &self.patch_re, "VERSION_PATCH", &version.patch.to_string())?;
    patched = replace_payload(&patched, &self.build_re, "VERSION_BUILD", &version.build.to_string())?;
    patched = replace_payload(&patched, &self.string_re, "VERSION_STRING", &version.to_string())?;
    patched = replace_payload(
      &patched,
      &self.date_re,
      "BUILD_DATE",
      &build_date.format("%d/%m/%Y").to_string(),
    )?;
    Ok(patched)
  }
}

/// Splice `new_value` over the payload capture of the first match,
/// leaving everything around it untouched.
fn replace_payload(text: &str, re: &Regex, name: &str, new_value: &str) -> ReleaseResult<String> {
  let payload = re
    .captures(text)
    .and_then(|caps| caps.get(1))
    .ok_or_else(|| {
      ReleaseError::Artifact(ArtifactError::MacroNotFound {
        name: name.to_string(),
      })
    })?;

  let mut out = String::with_capacity(text.len() + new_value.len());
  out.push_str(&text[..payload.start()]);
  out.push_str(new_value);
  out.push_str(&text[payload.end()..]);
  Ok(out)
}
