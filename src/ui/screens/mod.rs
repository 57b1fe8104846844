pub(crate) mod analysis;
pub(crate) mod record;
pub(crate) mod welcome;
