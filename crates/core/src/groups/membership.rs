//! Reads the current members of an existing group.

use std::collections::BTreeSet;

use log::{debug, trace};

use crate::errors::{Error, Result};

use super::kind::ObjectKindConfig;
use super::model::{GroupId, MemberId};
use super::ports::ObjectDirectory;

/// Fetch the member ids of an existing group so an update keeps them.
pub async fn read_existing_members(
    directory: &dyn ObjectDirectory,
    kind: &ObjectKindConfig,
    base_url: &str,
    object_id: &GroupId,
    token: &str,
) -> Result<BTreeSet<MemberId>> {
    let records = directory
        .read_field(
            base_url,
            kind.object_type,
            object_id,
            kind.membership_field_path,
            token,
        )
        .await?;
    trace!("[StaticGroup] Existing members of {} {}: {:?}", kind.display_name, object_id, records);

    let members = extract_member_ids(&records)?;
    debug!(
        "[StaticGroup] Imported {} existing assignments: {:?}",
        members.len(),
        members
    );
    Ok(members)
}

/// Keep only the `id` of every member record.
pub fn extract_member_ids(records: &[serde_json::Value]) -> Result<BTreeSet<MemberId>> {
    records
        .iter()
        .map(|record| {
            let id = record
                .get("id")
                .ok_or_else(|| Error::api(None, format!("Member record without id: {}", record)))?;
            serde_json::from_value::<MemberId>(id.clone())
                .map_err(|_| Error::api(None, format!("Unsupported member id: {}", id)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_ids_and_discards_other_fields() {
        let records = vec![
            json!({"id": 2, "name": "ZHVD0LQ3JP", "serial_number": "ZHVD0LQ3JP"}),
            json!({"id": 6, "name": "test's Virtual Machine", "mac_address": "E2:CE:B2:9C:FC:FD"}),
            json!({"id": 2, "name": "duplicate"}),
        ];
        let ids = extract_member_ids(&records).unwrap();
        assert_eq!(
            ids.into_iter().collect::<Vec<_>>(),
            vec![MemberId::from(2_i64), MemberId::from(6_i64)]
        );
    }

    #[test]
    fn empty_records_yield_empty_set() {
        assert!(extract_member_ids(&[]).unwrap().is_empty());
    }

    #[test]
    fn record_without_id_is_an_error() {
        let err = extract_member_ids(&[json!({"name": "orphan"})]).unwrap_err();
        assert!(matches!(err, Error::Api { status: None, .. }));
    }
}
