//! OTP record lifecycle: issue, evaluate, expire

mod ledger;
mod policy;


pub use ledger::{OtpLedger, OtpOutcome, MAX_WRITE_RETRIES};
pub use policy::OtpPolicy;
