// SPDX-License-Identifier: GPL-3.0

use super::{Engine, VarValue};
use crate::error::IntfError;

/// Typed, non-blocking reads of engine options.
///
/// Missing or mistyped options never fail the caller: the `read_*` family
/// falls back to the given default, the `try_*` family reports
/// `ConfigurationMissing`.
#[derive(Clone, Copy)]
pub struct OptionReader<'a> {
    engine: &'a dyn Engine,
}

impl<'a> OptionReader<'a> {
    pub fn new(engine: &'a dyn Engine) -> Self {
        Self { engine }
    }

    fn lookup<T>(&self, name: &str, convert: impl Fn(&VarValue) -> Option<T>) -> Result<T, IntfError> {
        match self.engine.option(name) {
            Some(value) => convert(&value).ok_or_else(|| {
                log::warn!("option {name:?} has unexpected type: {value:?}");
                IntfError::ConfigurationMissing(name.to_string())
            }),
            None => Err(IntfError::ConfigurationMissing(name.to_string())),
        }
    }

    pub fn try_int(&self, name: &str) -> Result<i64, IntfError> {
        self.lookup(name, VarValue::as_int)
    }

    pub fn try_bool(&self, name: &str) -> Result<bool, IntfError> {
        self.lookup(name, VarValue::as_bool)
    }

    pub fn try_float(&self, name: &str) -> Result<f64, IntfError> {
        self.lookup(name, VarValue::as_float)
    }

    pub fn try_string(&self, name: &str) -> Result<String, IntfError> {
        self.lookup(name, |v| v.as_str().map(str::to_string))
    }

    pub fn read_int(&self, name: &str, default: i64) -> i64 {
        self.try_int(name).unwrap_or_else(|err| {
            log::debug!("{err}, using {default}");
            default
        })
    }

    pub fn read_bool(&self, name: &str, default: bool) -> bool {
        self.try_bool(name).unwrap_or_else(|err| {
            log::debug!("{err}, using {default}");
            default
        })
    }

    pub fn read_float(&self, name: &str, default: f64) -> f64 {
        self.try_float(name).unwrap_or_else(|err| {
            log::debug!("{err}, using {default}");
            default
        })
    }

    pub fn read_string(&self, name: &str, default: &str) -> String {
        self.try_string(name).unwrap_or_else(|err| {
            log::debug!("{err}, using {default:?}");
            default.to_string()
        })
    }
}
