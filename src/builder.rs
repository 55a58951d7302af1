use std::path::Path;

use crate::{CodegenOptions, Config, Converter, Result};

#[derive(Debug, Clone, Default)]
pub struct ConverterBuilder {
    config: Config,
}

impl ConverterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a TOML configuration file.
    pub fn from_file<T: AsRef<Path>>(path: T) -> Result<Self> {
        Ok(Self {
            config: Config::create(path)?,
        })
    }

    pub fn config(
        mut self,
        config: Config,
    ) -> Self {
        self.config = config;
        self
    }

    pub fn codegen(
        mut self,
        codegen: CodegenOptions,
    ) -> Self {
        self.config.codegen = codegen;
        self
    }

    pub fn http_module(
        mut self,
        module: impl Into<String>,
    ) -> Self {
        self.config.codegen.http_module = module.into();
        self
    }

    pub fn backoff_base_ms(
        mut self,
        ms: u64,
    ) -> Self {
        self.config.codegen.backoff_base_ms = ms;
        self
    }

    pub fn verify_syntax(
        mut self,
        verify: bool,
    ) -> Self {
        self.config.verify_syntax = verify;
        self
    }

    pub fn build(&self) -> Result<Converter> {
        self.config.validate()?;
        Ok(Converter::new(self.config.clone()))
    }
}
