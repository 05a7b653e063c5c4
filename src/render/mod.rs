pub(crate) mod instances;
