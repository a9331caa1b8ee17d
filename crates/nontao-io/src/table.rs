// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use std::{
    fs::File,
    io::{Read, Write},
    path::Path,
};

use serde::{Serialize, de::DeserializeOwned};

use crate::err::ExchangeError;

/// A deserialized record together with the CSV line it came from.
pub(crate) struct Located<T> {
    pub line: Option<u64>,
    pub record: T,
}

pub(crate) fn open(path: &Path) -> Result<File, ExchangeError> {
    File::open(path).map_err(|e| ExchangeError::io(path, e))
}

pub(crate) fn create(path: &Path) -> Result<File, ExchangeError> {
    File::create(path).map_err(|e| ExchangeError::io(path, e))
}

pub(crate) fn read_records<R, T>(reader: R) -> Result<Vec<Located<T>>, ExchangeError>
where
    R: Read,
    T: DeserializeOwned,
{
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();

    let mut out = Vec::new();
    for row in rdr.records() {
        let row = row?;
        let line = row.position().map(|p| p.line());
        out.push(Located {
            line,
            record: row.deserialize(Some(&headers))?,
        });
    }
    Ok(out)
}

/// Writes `header` followed by `records`. The header is written even when
/// there are no records.
pub(crate) fn write_records<W, T, I>(
    writer: W,
    header: &[&str],
    records: I,
) -> Result<usize, ExchangeError>
where
    W: Write,
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(header)?;
    let mut count = 0usize;
    for record in records {
        wtr.serialize(record)?;
        count += 1;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(count)
}
