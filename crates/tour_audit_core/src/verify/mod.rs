pub mod fingerprint;
pub mod scorer;
pub mod validator;
