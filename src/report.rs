use std::io::Write;
use std::sync::Arc;

use arrow::array::{ArrayRef, PrimitiveArray, StringBuilder};
use arrow::datatypes::{DataType, Field, Float64Type, Schema, SchemaRef, UInt64Type};
use arrow::ipc::writer::FileWriter;
use arrow::record_batch::RecordBatch;

use crate::benchmark::Measurement;
use crate::compare::WordComparison;
use crate::error::Result;

const IPC_BATCH_SIZE: usize = 1 << 12;

pub fn render_measurement(m: &Measurement) -> String {
    format!(
        "[{variant}] Edit distance for size {size}: {distance}\n\
         [{variant}] Time for size {size}: {secs:.6} seconds.\n\
         [{variant}] Memory used for size {size}: {bytes} bytes.\n",
        variant = m.variant,
        size = m.size,
        distance = m.distance,
        secs = m.elapsed_secs,
        bytes = m.theoretical_bytes,
    )
}

pub fn render_comparison(c: &WordComparison) -> String {
    if c.variants_agree() {
        format!(
            "Edit distance between '{}' and '{}': {}",
            c.first, c.second, c.full_table
        )
    } else {
        format!(
            "Edit distance between '{}' and '{}': full-table {} != rolling-row {}",
            c.first, c.second, c.full_table, c.rolling_row
        )
    }
}

pub fn measurements_to_json(measurements: &[Measurement]) -> Result<String> {
    Ok(serde_json::to_string_pretty(measurements)?)
}

pub fn comparisons_to_json(comparisons: &[WordComparison]) -> Result<String> {
    Ok(serde_json::to_string_pretty(comparisons)?)
}

pub fn measurement_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new("size", DataType::UInt64, false),
        Field::new("variant", DataType::Utf8, false),
        Field::new("distance", DataType::UInt64, false),
        Field::new("elapsed_secs", DataType::Float64, false),
        Field::new("theoretical_cells", DataType::UInt64, false),
        Field::new("theoretical_bytes", DataType::UInt64, false),
        Field::new("allocated_bytes", DataType::UInt64, false),
    ]))
}

pub fn comparison_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new("first", DataType::Utf8, false),
        Field::new("second", DataType::Utf8, false),
        Field::new("full_table", DataType::UInt64, false),
        Field::new("rolling_row", DataType::UInt64, false),
    ]))
}

fn u64_column<R>(rows: &[R], value: impl Fn(&R) -> u64) -> ArrayRef {
    Arc::new(PrimitiveArray::<UInt64Type>::from(
        rows.iter().map(value).collect::<Vec<u64>>(),
    ))
}

fn f64_column<R>(rows: &[R], value: impl Fn(&R) -> f64) -> ArrayRef {
    Arc::new(PrimitiveArray::<Float64Type>::from(
        rows.iter().map(value).collect::<Vec<f64>>(),
    ))
}

fn utf8_column<R>(rows: &[R], value: impl Fn(&R) -> &str) -> ArrayRef {
    let mut builder = StringBuilder::with_capacity(rows.len(), rows.len() * 16);
    for row in rows {
        builder.append_value(value(row));
    }
    Arc::new(builder.finish())
}

/// Writes `rows` as an Arrow IPC file, one record batch per `IPC_BATCH_SIZE`
/// rows, and hands the writer back.
fn write_ipc<W, R, B>(writer: W, schema: SchemaRef, rows: &[R], columns: B) -> Result<W>
where
    W: Write,
    B: Fn(&[R]) -> Vec<ArrayRef>,
{
    let mut arrow_writer = FileWriter::try_new(writer, &schema)?;
    for chunk in rows.chunks(IPC_BATCH_SIZE) {
        let batch = RecordBatch::try_new(schema.clone(), columns(chunk))?;
        arrow_writer.write(&batch)?;
    }
    arrow_writer.finish()?;
    Ok(arrow_writer.into_inner()?)
}

pub fn write_measurements_ipc<W: Write>(writer: W, measurements: &[Measurement]) -> Result<W> {
    write_ipc(writer, measurement_schema(), measurements, |chunk| {
        vec![
            u64_column(chunk, |m| m.size as u64),
            utf8_column(chunk, |m| m.variant.name()),
            u64_column(chunk, |m| m.distance as u64),
            f64_column(chunk, |m| m.elapsed_secs),
            u64_column(chunk, |m| m.theoretical_cells),
            u64_column(chunk, |m| m.theoretical_bytes),
            u64_column(chunk, |m| m.allocated_bytes),
        ]
    })
}

pub fn write_comparisons_ipc<W: Write>(writer: W, comparisons: &[WordComparison]) -> Result<W> {
    write_ipc(writer, comparison_schema(), comparisons, |chunk| {
        vec![
            utf8_column(chunk, |c| c.first.as_str()),
            utf8_column(chunk, |c| c.second.as_str()),
            u64_column(chunk, |c| c.full_table as u64),
            u64_column(chunk, |c| c.rolling_row as u64),
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benchmark::Variant;
    use arrow::array::{Array, StringArray, UInt64Array};
    use arrow::ipc::reader::FileReader;
    use std::io::Cursor;

    fn measurement(size: usize, variant: Variant) -> Measurement {
        Measurement {
            size,
            variant,
            distance: size,
            elapsed_secs: 0.25,
            theoretical_cells: variant.theoretical_cells(size, size),
            theoretical_bytes: variant.theoretical_cells(size, size),
            allocated_bytes: variant.allocated_bytes(size, size).unwrap(),
        }
    }

    fn comparison(first: &str, second: &str, distance: usize) -> WordComparison {
        WordComparison {
            first: first.to_string(),
            second: second.to_string(),
            full_table: distance,
            rolling_row: distance,
        }
    }

    #[test]
    fn measurement_lines() {
        let text = render_measurement(&measurement(10, Variant::FullTable));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "[full-table] Edit distance for size 10: 10",
                "[full-table] Time for size 10: 0.250000 seconds.",
                "[full-table] Memory used for size 10: 100 bytes.",
            ]
        );
    }

    #[test]
    fn comparison_line_flags_disagreement() {
        assert_eq!(
            render_comparison(&comparison("cat", "cot", 1)),
            "Edit distance between 'cat' and 'cot': 1"
        );
        let mut broken = comparison("cat", "cot", 1);
        broken.rolling_row = 2;
        assert!(render_comparison(&broken).contains("full-table 1 != rolling-row 2"));
    }

    #[test]
    fn json_uses_field_names() {
        let json = measurements_to_json(&[measurement(4, Variant::RollingRow)]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["variant"], "rolling-row");
        assert_eq!(value[0]["theoretical_cells"], 4);

        let json = comparisons_to_json(&[comparison("a", "b", 1)]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["first"], "a");
        assert_eq!(value[0]["full_table"], 1);
    }

    #[test]
    fn measurement_ipc_reads_back() {
        let rows = vec![
            measurement(10, Variant::FullTable),
            measurement(10, Variant::RollingRow),
        ];
        let bytes = write_measurements_ipc(Vec::new(), &rows).unwrap();
        let reader = FileReader::try_new(Cursor::new(bytes), None).unwrap();
        assert_eq!(reader.schema(), measurement_schema());

        let batches: Vec<RecordBatch> = reader.map(|b| b.unwrap()).collect();
        assert_eq!(batches.len(), 1);
        let batch = &batches[0];
        assert_eq!(batch.num_rows(), 2);

        let variants = batch.column(1).as_any().downcast_ref::<StringArray>().unwrap();
        assert_eq!(variants.value(0), "full-table");
        assert_eq!(variants.value(1), "rolling-row");
        let cells = batch.column(4).as_any().downcast_ref::<UInt64Array>().unwrap();
        assert_eq!(cells.values().to_vec(), vec![100, 10]);
    }

    #[test]
    fn comparison_ipc_splits_into_batches() {
        let rows: Vec<WordComparison> = (0..IPC_BATCH_SIZE + 5)
            .map(|i| comparison("w", "x", i))
            .collect();
        let bytes = write_comparisons_ipc(Vec::new(), &rows).unwrap();
        let reader = FileReader::try_new(Cursor::new(bytes), None).unwrap();
        let sizes: Vec<usize> = reader.map(|b| b.unwrap().num_rows()).collect();
        assert_eq!(sizes, vec![IPC_BATCH_SIZE, 5]);
    }

    #[test]
    fn empty_ipc_still_has_schema() {
        let bytes = write_comparisons_ipc(Vec::new(), &[]).unwrap();
        let reader = FileReader::try_new(Cursor::new(bytes), None).unwrap();
        assert_eq!(reader.schema(), comparison_schema());
        assert_eq!(reader.count(), 0);
    }
}
