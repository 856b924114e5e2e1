pub(crate) mod single_admin;
