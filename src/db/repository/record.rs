use chrono::NaiveDateTime;
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::{BmiCategory, InsightRecord};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn insert_record(conn: &Connection, record: &InsightRecord) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO health_records (id, profile_id, bmi, bmi_category, symptoms,
         guidance, medicines, remedies, facilities, location, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            record.id.to_string(),
            record.profile_id.to_string(),
            record.bmi,
            record.bmi_category.as_str(),
            record.symptoms,
            record.guidance,
            record.medicines,
            record.remedies,
            record.facilities,
            record.location,
            record.created_at.format(TIMESTAMP_FORMAT).to_string(),
        ],
    )?;
    Ok(())
}

/// All records for one profile, newest first.
pub fn get_records_for_profile(
    conn: &Connection,
    profile_id: Uuid,
) -> Result<Vec<InsightRecord>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, profile_id, bmi, bmi_category, symptoms,
         guidance, medicines, remedies, facilities, location, created_at
         FROM health_records WHERE profile_id = ?1
         ORDER BY created_at DESC, id DESC",
    )?;

    let rows = stmt.query_map(params![profile_id.to_string()], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, f64>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, String>(4)?,
            row.get::<_, String>(5)?,
            row.get::<_, String>(6)?,
            row.get::<_, String>(7)?,
            row.get::<_, Option<String>>(8)?,
            row.get::<_, Option<String>>(9)?,
            row.get::<_, String>(10)?,
        ))
    })?;

    let mut records = Vec::new();
    for row in rows {
        let (
            id, profile_id, bmi, bmi_category, symptoms,
            guidance, medicines, remedies, facilities, location, created_at,
        ) = row?;
        records.push(InsightRecord {
            id: Uuid::parse_str(&id)
                .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
            profile_id: Uuid::parse_str(&profile_id)
                .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
            bmi,
            bmi_category: BmiCategory::parse(&bmi_category).ok_or_else(|| {
                DatabaseError::InvalidEnum {
                    field: "bmi_category".to_string(),
                    value: bmi_category,
                }
            })?,
            symptoms,
            guidance,
            medicines,
            remedies,
            facilities,
            location,
            created_at: NaiveDateTime::parse_from_str(&created_at, TIMESTAMP_FORMAT)
                .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        });
    }
    Ok(records)
}

/// Delete one record, scoped to its owning profile. Deleting a record
/// that does not exist for this profile is `NotFound`.
pub fn delete_record(
    conn: &Connection,
    profile_id: Uuid,
    record_id: Uuid,
) -> Result<(), DatabaseError> {
    let affected = conn.execute(
        "DELETE FROM health_records WHERE id = ?1 AND profile_id = ?2",
        params![record_id.to_string(), profile_id.to_string()],
    )?;
    if affected == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "health_record".to_string(),
            id: record_id.to_string(),
        });
    }
    Ok(())
}
