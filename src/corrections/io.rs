/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! JSON persistence for corrections and their inputs

use super::errors::Result;
use super::{EfnvInput, ExtendedFnvCorrection, GkfoCorrection, GkfoInput};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Round trip of a value through a JSON document
///
/// Deserialization runs the same validation as the constructors, so a file
/// that decodes is always a valid value.
pub trait ToJsonFile: Serialize + DeserializeOwned {
    /// Pretty-printed JSON text
    fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON text
    fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Write to a JSON file, replacing any existing content
    fn to_json_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    /// Read from a JSON file
    fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}

impl ToJsonFile for ExtendedFnvCorrection {}
impl ToJsonFile for GkfoCorrection {}
impl ToJsonFile for EfnvInput {}
impl ToJsonFile for GkfoInput {}
