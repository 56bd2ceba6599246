//! Pipeline stages for text-to-PDF conversion.
//!
//! Each submodule implements exactly one transformation step. Keeping
//! stages separate makes each independently testable and lets us swap an
//! implementation (e.g. a different detector) without touching the others.
//!
//! ## Data Flow
//!
//! ```text
//! bytes ──▶ detect ──▶ decode ──▶ assemble ──▶ PDF bytes
//!          (chardetng) (encoding_rs)  ▲  (genpdf/printpdf)
//!                                    │
//!                                  fonts
//!                            (fallback cascade)
//! ```
//!
//! 1. [`detect`]   — statistically infer the input's character encoding;
//!    inconclusive input falls back to UTF-8, never to an error
//! 2. [`decode`]   — re-read the bytes under the chosen encoding into a
//!    newline-joined text buffer
//! 3. [`fonts`]    — resolve a font able to render the decoded script,
//!    degrading gracefully down a fixed cascade
//! 4. [`assemble`] — lay the text out as a paginated PDF with the resolved
//!    font at the configured size

pub mod assemble;
pub mod decode;
pub mod detect;
pub mod fonts;
