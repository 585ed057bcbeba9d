//! Response validation and record decoding
//!
//! # Overview
//!
//! Every raw response is classified exactly once, by status code first and
//! then by body shape. Only a `Success` classification is ever handed to the
//! record decoder, and a typed record is only built from a body whose
//! required fields are all present.
//!
//! Unknown fields are ignored so new vendor fields do not break decoding.

mod records;
mod types;
mod validator;

pub use records::{decode_one, decode_page, extract_path};
pub use types::{Classification, Page, Record, RecordShape};
pub use validator::ResponseValidator;
