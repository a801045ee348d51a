use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Deterministic splitmix64 stream; enough for coin flips and rough ages.
struct Rng(u64);

impl Rng {
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        (z ^ (z >> 31)) as f64 / u64::MAX as f64
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Bell-shaped sample: the mean of four uniforms, rescaled to `spread`
    /// on either side of `center`.
    fn bell(&mut self, center: f64, spread: f64) -> f64 {
        let mean = (0..4).map(|_| self.next_f64()).sum::<f64>() / 4.0;
        center + (mean - 0.5) * 2.0 * spread
    }
}

/// Rough survival odds by (sex, class), in the spirit of the historical record.
fn survival_rate(sex: &str, pclass: i64) -> f64 {
    match (sex, pclass) {
        ("female", 1) => 0.95,
        ("female", 2) => 0.90,
        ("female", _) => 0.50,
        (_, 1) => 0.37,
        (_, 2) => 0.16,
        _ => 0.14,
    }
}

struct Row {
    id: i64,
    survived: i64,
    pclass: i64,
    name: String,
    sex: &'static str,
    age: Option<f64>,
}

fn generate(n: i64, rng: &mut Rng) -> Vec<Row> {
    (1..=n)
        .map(|id| {
            let sex = if rng.chance(0.35) { "female" } else { "male" };
            let pclass = match rng.next_f64() {
                p if p < 0.24 => 1,
                p if p < 0.45 => 2,
                _ => 3,
            };
            let survived = i64::from(rng.chance(survival_rate(sex, pclass)));
            // About a fifth of ages are unknown.
            let age = if rng.chance(0.2) {
                None
            } else {
                let mean = 38.0 - 4.5 * pclass as f64;
                Some((rng.bell(mean, 30.0).max(0.42) * 2.0).round() / 2.0)
            };
            Row {
                id,
                survived,
                pclass,
                name: format!("Passenger {id}"),
                sex,
                age,
            }
        })
        .collect()
}

fn write_csv(path: &str, rows: &[Row]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    writer.write_record(["PassengerId", "Survived", "Pclass", "Name", "Sex", "Age"])?;
    for r in rows {
        writer.write_record([
            r.id.to_string(),
            r.survived.to_string(),
            r.pclass.to_string(),
            r.name.clone(),
            r.sex.to_string(),
            r.age.map(|a| a.to_string()).unwrap_or_default(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &str, rows: &[Row]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("PassengerId", DataType::Int64, false),
        Field::new("Survived", DataType::Int64, false),
        Field::new("Pclass", DataType::Int64, false),
        Field::new("Name", DataType::Utf8, false),
        Field::new("Sex", DataType::Utf8, false),
        Field::new("Age", DataType::Float64, true),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.id))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.survived))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.pclass))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.name.as_str()))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.sex))),
            Arc::new(rows.iter().map(|r| r.age).collect::<Float64Array>()),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = Rng(1912);
    let rows = generate(891, &mut rng);

    write_csv("titanic_dataset.csv", &rows)?;
    write_parquet("titanic_dataset.parquet", &rows)?;

    let unknown = rows.iter().filter(|r| r.age.is_none()).count();
    println!(
        "Wrote {} passengers ({unknown} with unknown age) to titanic_dataset.csv and titanic_dataset.parquet",
        rows.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_rows() {
        let a = generate(50, &mut Rng(7));
        let b = generate(50, &mut Rng(7));
        assert!(a
            .iter()
            .zip(&b)
            .all(|(x, y)| x.sex == y.sex && x.pclass == y.pclass && x.age == y.age));
    }

    #[test]
    fn rows_stay_in_range() {
        let rows = generate(891, &mut Rng(1912));
        assert!(rows.iter().all(|r| (1..=3).contains(&r.pclass)));
        assert!(rows.iter().all(|r| r.survived == 0 || r.survived == 1));
        assert!(rows.iter().filter_map(|r| r.age).all(|a| (0.0..=80.0).contains(&a)));
        assert!(rows.iter().any(|r| r.age.is_none()));
    }
}
