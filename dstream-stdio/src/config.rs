use std::{io::Read, path::PathBuf};

use dstream_types::{Json, ProviderErr, ProviderResult};
use serde::de::DeserializeOwned;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
/// Where a host finds the provider configuration.
pub enum ConfigSource {
    /// Read the first JSON document from stdin. The pipe may stay open afterwards.
    #[default]
    Stdin,
    File(PathBuf),
    /// A literal JSON document.
    Inline(String),
}

/// Decode the first JSON document of `reader`. Nothing after it is read, so the caller does not
/// have to close its end first. Input that ends before any document yields the default, as does `null`.
pub fn read_config<C, R>(reader: R) -> ProviderResult<C>
where
    C: DeserializeOwned + Default,
    R: Read,
{
    let value = match serde_json::Deserializer::from_reader(reader)
        .into_iter::<Json>()
        .next()
    {
        None => {
            log::debug!("Empty configuration; using defaults");
            return Ok(C::default());
        }
        Some(Ok(value)) => value,
        Some(Err(e)) if e.is_io() => return Err(ProviderErr::Io(e.into())),
        Some(Err(e)) => return Err(ProviderErr::Config(e)),
    };
    from_value(value)
}

/// Empty input, or a JSON `null`, yields the default configuration.
/// Anything that is not valid JSON for `C` is a [`ProviderErr::Config`].
pub fn parse_config<C>(input: &str) -> ProviderResult<C>
where
    C: DeserializeOwned + Default,
{
    let input = input.trim();
    if input.is_empty() {
        log::debug!("Empty configuration; using defaults");
        return Ok(C::default());
    }
    from_value(serde_json::from_str(input).map_err(ProviderErr::Config)?)
}

fn from_value<C>(value: Json) -> ProviderResult<C>
where
    C: DeserializeOwned + Default,
{
    if value.is_null() {
        return Ok(C::default());
    }
    serde_json::from_value(value).map_err(ProviderErr::Config)
}
