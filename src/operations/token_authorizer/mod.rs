pub(crate) mod hmac;
