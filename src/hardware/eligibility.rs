//! Disk Eligibility
//!
//! Decides which disks count toward the storage pool of an add-on.
//! Ineligible disks are excluded silently; there is no size-policy error.

use crate::domain::inventory::{Disk, DriveType};

/// Drive types a storage pool can be built from, unless a policy says otherwise
pub const DEFAULT_ELIGIBLE_DRIVE_TYPES: &[DriveType] = &[DriveType::Hdd, DriveType::Ssd];

/// Filter over a host's disks
#[derive(Debug, Clone, Copy)]
pub struct DiskEligibility<'a> {
    drive_types: &'a [DriveType],
}

impl<'a> DiskEligibility<'a> {
    pub fn new(drive_types: &'a [DriveType]) -> Self {
        Self { drive_types }
    }

    /// A disk is eligible when its type is accepted, it has a size and it is
    /// not the installation disk
    pub fn is_eligible(&self, disk: &Disk, installation_disk_id: &str) -> bool {
        self.drive_types.contains(&disk.drive_type)
            && disk.size_bytes != 0
            && disk.id != installation_disk_id
    }

    /// Count eligible disks
    pub fn count(&self, disks: &[Disk], installation_disk_id: &str) -> u64 {
        disks
            .iter()
            .filter(|disk| self.is_eligible(disk, installation_disk_id))
            .count() as u64
    }
}

impl Default for DiskEligibility<'static> {
    fn default() -> Self {
        Self::new(DEFAULT_ELIGIBLE_DRIVE_TYPES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::units::GB;

    fn count_eligible(disks: &[Disk], installation_disk_id: &str) -> u64 {
        DiskEligibility::default().count(disks, installation_disk_id)
    }

    fn disk(id: &str, size_bytes: u64, drive_type: DriveType) -> Disk {
        Disk {
            id: id.to_string(),
            size_bytes,
            drive_type,
        }
    }

    #[test]
    fn test_excludes_installation_disk() {
        let disks = vec![
            disk("/dev/sda", 20 * GB, DriveType::Hdd),
            disk("/dev/sdb", 40 * GB, DriveType::Ssd),
        ];
        assert_eq!(count_eligible(&disks, "/dev/sda"), 1);
        assert_eq!(count_eligible(&disks, "/dev/sdc"), 2);
    }

    #[test]
    fn test_excludes_zero_size_and_other_types() {
        let disks = vec![
            disk("/dev/sdb", 0, DriveType::Ssd),
            disk("/dev/sr0", 4 * GB, DriveType::Other),
            disk("/dev/sdc", 1, DriveType::Hdd),
        ];
        assert_eq!(count_eligible(&disks, ""), 1);
    }

    #[test]
    fn test_order_independent_and_bounded() {
        let mut disks = vec![
            disk("a", GB, DriveType::Hdd),
            disk("b", 0, DriveType::Hdd),
            disk("c", GB, DriveType::Ssd),
            disk("d", GB, DriveType::Other),
        ];
        let forward = count_eligible(&disks, "a");
        disks.reverse();
        assert_eq!(count_eligible(&disks, "a"), forward);
        assert!(forward <= disks.len() as u64);
        assert_eq!(count_eligible(&[], "a"), 0);
    }

    #[test]
    fn test_custom_drive_types() {
        let ssd_only = DiskEligibility::new(&[DriveType::Ssd]);
        let disks = vec![disk("a", GB, DriveType::Hdd), disk("b", GB, DriveType::Ssd)];
        assert_eq!(ssd_only.count(&disks, ""), 1);
        assert!(!ssd_only.is_eligible(&disks[0], ""));
    }
}
