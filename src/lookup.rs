//! Evaluation of extracted tables: bilinear interpolation on the
//! reduced-property grids and saturation pressure from correlation constants.

use thiserror::Error;

use crate::model::{CorrelationRecord, GridTable, GridTables, TableKind};

pub type LookupResult<T> = Result<T, LookupError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LookupError {
    #[error("reduced pressure {value} is outside the {kind} table range [{min}, {max}]")]
    PressureOutOfRange {
        kind: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("reduced temperature {value} is outside the {kind} table range [{min}, {max}]")]
    TemperatureOutOfRange {
        kind: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{kind} table needs at least two entries on each axis")]
    DegenerateAxis { kind: &'static str },

    #[error("{kind} table has no value near Pr={pr}, Tr={tr}")]
    MissingValue { kind: &'static str, pr: f64, tr: f64 },

    #[error("{kind} table was not extracted")]
    MissingTable { kind: &'static str },

    #[error("temperature {value} is outside the valid range [{min}, {max}] for {name}")]
    OutsideValidRange {
        name: String,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Index `i` of the interval `[axis[i], axis[i + 1]]` holding `value`,
/// clamped to the first and last interval.
pub fn interval_index(axis: &[f64], value: f64) -> usize {
    let last = axis.len().saturating_sub(2);
    match axis.partition_point(|entry| *entry < value) {
        0 => 0,
        found if found >= axis.len() => last,
        found => (found - 1).min(last),
    }
}

impl GridTable {
    /// Bilinear interpolation at reduced pressure `pr` and reduced
    /// temperature `tr`.
    pub fn at(&self, pr: f64, tr: f64) -> LookupResult<f64> {
        let kind = self.kind.as_str();
        let pressures = &self.reduced_pressure_axis;
        let temperatures = &self.reduced_temperature_axis;

        if pressures.len() < 2 || temperatures.len() < 2 {
            return Err(LookupError::DegenerateAxis { kind });
        }

        let (p_min, p_max) = (pressures[0], pressures[pressures.len() - 1]);
        if pr < p_min || pr > p_max {
            return Err(LookupError::PressureOutOfRange {
                kind,
                value: pr,
                min: p_min,
                max: p_max,
            });
        }

        let (t_min, t_max) = (temperatures[0], temperatures[temperatures.len() - 1]);
        if tr < t_min || tr > t_max {
            return Err(LookupError::TemperatureOutOfRange {
                kind,
                value: tr,
                min: t_min,
                max: t_max,
            });
        }

        let i = interval_index(pressures, pr);
        let j = interval_index(temperatures, tr);
        let cell = |row: usize, column: usize| {
            self.values
                .get(row)
                .and_then(|values| values.get(column))
                .copied()
                .flatten()
                .ok_or(LookupError::MissingValue { kind, pr, tr })
        };

        let (x1, x2) = (pressures[i], pressures[i + 1]);
        let (y1, y2) = (temperatures[j], temperatures[j + 1]);
        let wx = (pr - x1) / (x2 - x1);
        let wy = (tr - y1) / (y2 - y1);

        let lower = (1.0 - wx) * cell(j, i)? + wx * cell(j, i + 1)?;
        let upper = (1.0 - wx) * cell(j + 1, i)? + wx * cell(j + 1, i + 1)?;

        Ok((1.0 - wy) * lower + wy * upper)
    }
}

/// A base ("0") table and its acentric correction ("1") table.
#[derive(Debug, Clone, Copy)]
pub struct Correlation<'a> {
    pub base: &'a GridTable,
    pub departure: &'a GridTable,
}

impl<'a> Correlation<'a> {
    pub fn from_tables(
        tables: &'a GridTables,
        base: TableKind,
        departure: TableKind,
    ) -> LookupResult<Self> {
        let table = move |kind: TableKind| {
            tables
                .get(&kind)
                .and_then(|fragments| fragments.first())
                .ok_or(LookupError::MissingTable {
                    kind: kind.as_str(),
                })
        };

        Ok(Self {
            base: table(base)?,
            departure: table(departure)?,
        })
    }

    pub fn at(&self, pr: f64, tr: f64) -> LookupResult<(f64, f64)> {
        Ok((self.base.at(pr, tr)?, self.departure.at(pr, tr)?))
    }
}

/// Pitzer combination `v0 + omega * v1`.
pub fn combine(v0: f64, v1: f64, omega: f64) -> f64 {
    v0 + omega * v1
}

impl CorrelationRecord {
    /// `ln P = A - B / (T + C)`; errors outside the record's valid range.
    pub fn ln_psat(&self, t: f64) -> LookupResult<f64> {
        if t < self.valid_temp_min || t > self.valid_temp_max {
            return Err(LookupError::OutsideValidRange {
                name: self.name.clone(),
                value: t,
                min: self.valid_temp_min,
                max: self.valid_temp_max,
            });
        }

        Ok(self.a - self.b / (t + self.c))
    }

    pub fn psat(&self, t: f64) -> LookupResult<f64> {
        Ok(self.ln_psat(t)?.exp())
    }

    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim();
        self.name.eq_ignore_ascii_case(query) || self.formula.eq_ignore_ascii_case(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn z_table(kind: TableKind, values: Vec<Vec<Option<f64>>>) -> GridTable {
        GridTable {
            kind,
            reduced_pressure_axis: vec![0.5, 1.0, 2.0],
            reduced_temperature_axis: vec![0.8, 1.0],
            values,
        }
    }

    fn filled(kind: TableKind) -> GridTable {
        z_table(
            kind,
            vec![
                vec![Some(1.0), Some(2.0), Some(4.0)],
                vec![Some(3.0), Some(4.0), Some(8.0)],
            ],
        )
    }

    fn acetone() -> CorrelationRecord {
        CorrelationRecord {
            name: "Acetone".to_string(),
            formula: "C3H6O".to_string(),
            a: 14.3145,
            b: 2756.22,
            c: 228.06,
            valid_temp_min: -26.0,
            valid_temp_max: 77.0,
            enthalpy_param: 29.10,
            normal_boiling_temp: 56.2,
        }
    }

    #[test]
    fn interval_index_clamps_to_outer_intervals() {
        let axis = [10.0, 20.0, 30.0, 40.0, 50.0];
        assert_eq!(interval_index(&axis, 35.0), 2);
        assert_eq!(interval_index(&axis, 30.0), 1);
        assert_eq!(interval_index(&axis, 40.0), 2);
        assert_eq!(interval_index(&axis, 15.0), 0);
        assert_eq!(interval_index(&axis, 10.0), 0);
        assert_eq!(interval_index(&axis, 45.0), 3);
        assert_eq!(interval_index(&axis, 5.0), 0);
        assert_eq!(interval_index(&axis, 55.0), 3);
    }

    #[test]
    fn grid_lookup_hits_nodes_and_interpolates_between_them() {
        let table = filled(TableKind::Z0);
        assert_eq!(table.at(1.0, 0.8), Ok(2.0));
        assert_eq!(table.at(2.0, 1.0), Ok(8.0));
        assert_eq!(table.at(0.75, 0.9), Ok(2.5));
        assert_eq!(table.at(1.5, 0.8), Ok(3.0));
    }

    #[test]
    fn grid_lookup_rejects_out_of_range_and_missing_cells() {
        let table = filled(TableKind::Z0);
        assert!(matches!(
            table.at(0.1, 0.9),
            Err(LookupError::PressureOutOfRange { .. })
        ));
        assert!(matches!(
            table.at(1.0, 1.5),
            Err(LookupError::TemperatureOutOfRange { .. })
        ));

        let sparse = z_table(
            TableKind::Z0,
            vec![
                vec![Some(1.0), None, Some(4.0)],
                vec![Some(3.0), Some(4.0), Some(8.0)],
            ],
        );
        assert!(matches!(
            sparse.at(0.75, 0.9),
            Err(LookupError::MissingValue { .. })
        ));
        assert!(sparse.at(1.5, 0.9).is_err());
    }

    #[test]
    fn correlation_combines_base_and_departure_tables() {
        let mut tables = GridTables::new();
        tables.insert(TableKind::Z0, vec![filled(TableKind::Z0)]);
        tables.insert(TableKind::Z1, vec![filled(TableKind::Z1)]);

        let correlation =
            Correlation::from_tables(&tables, TableKind::Z0, TableKind::Z1).expect("tables exist");
        let (v0, v1) = correlation.at(1.0, 0.8).expect("in range");
        assert_eq!((v0, v1), (2.0, 2.0));
        assert_eq!(combine(v0, v1, 0.5), 3.0);

        let missing = Correlation::from_tables(&tables, TableKind::H0, TableKind::H1);
        assert_eq!(
            missing.err(),
            Some(LookupError::MissingTable { kind: "h0" })
        );
    }

    #[test]
    fn saturation_pressure_respects_valid_range() {
        let record = acetone();
        let ln_p = record.ln_psat(56.2).expect("in range");
        assert!((ln_p - (14.3145 - 2756.22 / (56.2 + 228.06))).abs() < 1e-12);
        assert!((record.psat(56.2).expect("in range") - 101.3).abs() < 1.0);
        assert!(matches!(
            record.psat(100.0),
            Err(LookupError::OutsideValidRange { .. })
        ));
    }

    #[test]
    fn record_matches_name_or_formula_case_insensitively() {
        let record = acetone();
        assert!(record.matches("acetone"));
        assert!(record.matches(" c3h6o "));
        assert!(!record.matches("benzene"));
    }
}
