use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{
    Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::{Dataset, Passenger, RawPassenger};

/// Columns every source must provide.
pub const REQUIRED_COLUMNS: [&str; 4] = ["Sex", "Pclass", "Survived", "Age"];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a passenger dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with `Sex`, `Pclass`, `Survived`, `Age` (empty age = unknown)
/// * `.json`    – `[{ "Sex": "male", "Pclass": 3, "Survived": 0, "Age": null }, ...]`
/// * `.parquet` – the same columns as a flat table
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let passengers = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    Ok(Dataset::new(passengers).with_source(path))
}

fn validate(raw: RawPassenger, row: usize) -> Result<Passenger> {
    Passenger::try_from(raw).with_context(|| format!("Row {row}: invalid passenger"))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Vec<Passenger>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers = reader.headers().context("reading CSV headers")?.clone();

    for col in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == col) {
            bail!("CSV missing '{col}' column");
        }
    }

    reader
        .deserialize::<RawPassenger>()
        .enumerate()
        .map(|(row, result)| {
            let raw = result.with_context(|| format!("CSV row {row}"))?;
            validate(raw, row)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, as written by `df.to_json(orient='records')`.
fn load_json(path: &Path) -> Result<Vec<Passenger>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let rows: Vec<RawPassenger> = serde_json::from_str(&text).context("parsing JSON")?;

    rows.into_iter()
        .enumerate()
        .map(|(row, raw)| validate(raw, row))
        .collect()
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`), where integer columns may come out as
/// Int32 or Int64 and `Age` as a nullable float column.
fn load_parquet(path: &Path) -> Result<Vec<Passenger>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut passengers = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let sex = required_column(&batch, "Sex")?;
        let pclass = required_column(&batch, "Pclass")?;
        let survived = required_column(&batch, "Survived")?;
        let age = required_column(&batch, "Age")?;
        let passenger_id = schema.index_of("PassengerId").ok().map(|i| batch.column(i));
        let name = schema.index_of("Name").ok().map(|i| batch.column(i));

        for row in 0..batch.num_rows() {
            let row_no = passengers.len();
            let raw = RawPassenger {
                sex: extract_string(sex, row)?
                    .with_context(|| format!("Row {row_no}: missing Sex"))?,
                pclass: extract_i64(pclass, row)?
                    .with_context(|| format!("Row {row_no}: missing Pclass"))?,
                survived: extract_i64(survived, row)?
                    .with_context(|| format!("Row {row_no}: missing Survived"))?,
                age: extract_f64(age, row)?,
                passenger_id: passenger_id.map(|c| extract_i64(c, row)).transpose()?.flatten(),
                name: name.map(|c| extract_string(c, row)).transpose()?.flatten(),
            };
            passengers.push(validate(raw, row_no)?);
        }
    }

    Ok(passengers)
}

// -- Arrow helpers --

fn required_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a Arc<dyn Array>> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| anyhow::anyhow!("Parquet file missing '{name}' column"))?;
    Ok(batch.column(idx))
}

fn extract_string(col: &Arc<dyn Array>, row: usize) -> Result<Option<String>> {
    if col.is_null(row) {
        return Ok(None);
    }
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            Ok(Some(arr.value(row).to_string()))
        }
        DataType::LargeUtf8 => Ok(Some(col.as_string::<i64>().value(row).to_string())),
        other => bail!("Expected string column, got {other:?}"),
    }
}

fn extract_i64(col: &Arc<dyn Array>, row: usize) -> Result<Option<i64>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let value = match col.data_type() {
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .context("expected Int32Array")?
            .value(row) as i64,
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .context("expected Int64Array")?
            .value(row),
        other => bail!("Expected integer column, got {other:?}"),
    };
    Ok(Some(value))
}

fn extract_f64(col: &Arc<dyn Array>, row: usize) -> Result<Option<f64>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let value = match col.data_type() {
        DataType::Float64 => col
            .as_any()
            .downcast_ref::<Float64Array>()
            .context("expected Float64Array")?
            .value(row),
        DataType::Float32 => col
            .as_any()
            .downcast_ref::<Float32Array>()
            .context("expected Float32Array")?
            .value(row) as f64,
        DataType::Int32 | DataType::Int64 => match extract_i64(col, row)? {
            Some(i) => i as f64,
            None => return Ok(None),
        },
        other => bail!("Expected numeric column, got {other:?}"),
    };
    // Pandas writes unknown floats as NaN rather than null.
    Ok(Some(value).filter(|v| !v.is_nan()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Pclass, Sex};
    use std::path::PathBuf;

    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("titanic-explorer-{}-{name}", std::process::id()))
    }

    #[test]
    fn loads_csv_with_unknown_ages_and_extra_columns() -> Result<()> {
        let path = temp_path("ok.csv");
        std::fs::write(
            &path,
            "PassengerId,Survived,Pclass,Name,Sex,Age,Fare\n\
             1,0,3,\"Braund, Mr. Owen Harris\",male,22,7.25\n\
             2,1,1,\"Cumings, Mrs. John Bradley\",female,38,71.28\n\
             6,0,3,\"Moran, Mr. James\",male,,8.46\n",
        )?;

        let ds = load_file(&path)?;
        std::fs::remove_file(&path)?;

        assert_eq!(ds.len(), 3);
        assert_eq!(ds.source.as_deref(), Some(path.as_path()));
        let first = &ds.passengers[0];
        assert_eq!(first.sex, Sex::Male);
        assert_eq!(first.pclass, Pclass::Third);
        assert!(!first.survived);
        assert_eq!(first.age, Some(22.0));
        assert_eq!(first.name.as_deref(), Some("Braund, Mr. Owen Harris"));
        assert_eq!(ds.passengers[2].age, None);
        assert_eq!(ds.passengers[2].passenger_id, Some(6));
        Ok(())
    }

    #[test]
    fn csv_missing_column_is_an_error() -> Result<()> {
        let path = temp_path("missing.csv");
        std::fs::write(&path, "Survived,Pclass,Sex\n1,1,female\n")?;
        let err = load_file(&path).unwrap_err();
        std::fs::remove_file(&path)?;
        assert!(format!("{err:#}").contains("'Age'"));
        Ok(())
    }

    #[test]
    fn csv_invalid_row_is_an_error() -> Result<()> {
        let path = temp_path("bad.csv");
        std::fs::write(&path, "Survived,Pclass,Sex,Age\n1,1,female,30\n1,7,male,40\n")?;
        let err = load_file(&path).unwrap_err();
        std::fs::remove_file(&path)?;
        let msg = format!("{err:#}");
        assert!(msg.contains("Row 1"), "{msg}");
        Ok(())
    }

    #[test]
    fn loads_json_records() -> Result<()> {
        let path = temp_path("ok.json");
        std::fs::write(
            &path,
            r#"[
                {"Sex": "female", "Pclass": 2, "Survived": 1, "Age": 29.5},
                {"Sex": "male", "Pclass": 1, "Survived": 0, "Age": null}
            ]"#,
        )?;
        let ds = load_file(&path)?;
        std::fs::remove_file(&path)?;

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.passengers[0].pclass, Pclass::Second);
        assert_eq!(ds.passengers[0].age, Some(29.5));
        assert_eq!(ds.passengers[1].age, None);
        Ok(())
    }

    #[test]
    fn loads_parquet_with_null_ages() -> Result<()> {
        let path = temp_path("ok.parquet");
        let schema = Arc::new(Schema::new(vec![
            Field::new("Sex", DataType::Utf8, false),
            Field::new("Pclass", DataType::Int64, false),
            Field::new("Survived", DataType::Int32, false),
            Field::new("Age", DataType::Float64, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["male", "female", "female"])),
                Arc::new(Int64Array::from(vec![3, 1, 2])),
                Arc::new(Int32Array::from(vec![0, 1, 1])),
                Arc::new(Float64Array::from(vec![Some(40.0), None, Some(f64::NAN)])),
            ],
        )?;
        let file = std::fs::File::create(&path)?;
        let mut writer = ArrowWriter::try_new(file, schema, None)?;
        writer.write(&batch)?;
        writer.close()?;

        let ds = load_file(&path)?;
        std::fs::remove_file(&path)?;

        assert_eq!(ds.len(), 3);
        assert_eq!(ds.passengers[0].age, Some(40.0));
        assert_eq!(ds.passengers[1].age, None);
        assert_eq!(ds.passengers[2].age, None);
        assert!(ds.passengers[1].survived);
        assert_eq!(ds.passengers[2].sex, Sex::Female);
        Ok(())
    }

    #[test]
    fn missing_file_is_an_error() {
        for name in ["absent.csv", "absent.json", "absent.parquet"] {
            let path = temp_path(name);
            let err = load_file(&path).unwrap_err();
            assert!(
                format!("{err:#}").contains(&path.display().to_string()),
                "{err:#}"
            );
        }
    }

    #[test]
    fn rejects_unknown_extension() {
        let err = load_file(Path::new("passengers.xlsx")).unwrap_err();
        assert!(err.to_string().contains(".xlsx"));
    }
}
