use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::records::{Order, OrderItem};

/// Write the orders table. Returns the number of bytes written.
pub fn write_orders_csv(path: &Path, orders: &[Order]) -> Result<u64, csv::Error> {
    write_rows(path, &Order::COLUMNS, orders)
}

/// Write the order-items table. Returns the number of bytes written.
pub fn write_order_items_csv(path: &Path, items: &[OrderItem]) -> Result<u64, csv::Error> {
    write_rows(path, &OrderItem::COLUMNS, items)
}

/// The header is written explicitly so empty tables still carry it.
fn write_rows<T: Serialize>(path: &Path, header: &[&str], rows: &[T]) -> Result<u64, csv::Error> {
    let writer = BufWriter::new(File::create(path).map_err(csv::Error::from)?);
    let counting = CountingWriter::new(writer);
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(counting);

    writer.write_record(header)?;
    for row in rows {
        writer.serialize(row)?;
    }

    writer.flush()?;
    let mut counting = writer.into_inner().map_err(|err| err.into_error())?;
    counting.flush()?;
    Ok(counting.bytes_written())
}

struct CountingWriter<W: Write> {
    inner: W,
    bytes: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, bytes: 0 }
    }

    fn bytes_written(&self) -> u64 {
        self.bytes
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let size = self.inner.write(buf)?;
        self.bytes = self.bytes.saturating_add(size as u64);
        Ok(size)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
