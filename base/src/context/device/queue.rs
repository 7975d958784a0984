
use ash::vk;

use crate::vkuint;

/// The queue family roles a device must fill before it is usable.
///
/// Both roles may land on the same family; when they differ the swapchain has
/// to share its images between the two families.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueueFamilyIndices {

    /// index of the first family advertising graphics operations.
    pub graphics: Option<vkuint>,
    /// index of the first family able to present to the target surface.
    pub present: Option<vkuint>,
}

impl QueueFamilyIndices {

    /// The selection is usable once every role has been assigned.
    pub fn is_complete(&self) -> bool {
        self.graphics.is_some() && self.present.is_some()
    }
}

/// Scan the queue families of a device in index order and assign each role to
/// the first family that can fill it.
///
/// `is_family_presentable` answers whether a family can present to the target
/// surface; it is passed in so the scan itself stays independent of any live
/// surface. The scan stops as soon as both roles are assigned.
pub(crate) fn find_queue_families(families: &[vk::QueueFamilyProperties], mut is_family_presentable: impl FnMut(vkuint) -> bool) -> QueueFamilyIndices {

    let mut indices = QueueFamilyIndices::default();

    for (i, family) in families.iter().enumerate() {

        let family_index = i as vkuint;

        if family.queue_count > 0 {

            if indices.graphics.is_none() && family.queue_flags.contains(vk::QueueFlags::GRAPHICS) {
                indices.graphics = Some(family_index);
            }

            if indices.present.is_none() && is_family_presentable(family_index) {
                indices.present = Some(family_index);
            }
        }

        if indices.is_complete() {
            break
        }
    }

    indices
}


#[cfg(test)]
mod test {

    use super::*;

    fn family(queue_count: vkuint, queue_flags: vk::QueueFlags) -> vk::QueueFamilyProperties {
        vk::QueueFamilyProperties {
            queue_count, queue_flags,
            ..Default::default()
        }
    }

    #[test]
    fn shared_family_serves_both_roles() {

        let families = [family(1, vk::QueueFlags::GRAPHICS | vk::QueueFlags::TRANSFER)];

        let indices = find_queue_families(&families, |_| true);
        assert_eq!(indices.graphics, Some(0));
        assert_eq!(indices.present, Some(0));
        assert!(indices.is_complete());
    }

    #[test]
    fn roles_may_land_on_different_families() {

        let families = [
            family(1, vk::QueueFlags::GRAPHICS),
            family(1, vk::QueueFlags::COMPUTE),
        ];

        // only the second family can present.
        let indices = find_queue_families(&families, |index| index == 1);
        assert_eq!(indices.graphics, Some(0));
        assert_eq!(indices.present, Some(1));
    }

    #[test]
    fn first_matching_family_wins_each_role() {

        let families = [
            family(1, vk::QueueFlags::GRAPHICS),
            family(1, vk::QueueFlags::GRAPHICS),
        ];

        let indices = find_queue_families(&families, |_| true);
        assert_eq!(indices.graphics, Some(0));
        assert_eq!(indices.present, Some(0));
    }

    #[test]
    fn family_without_queues_is_skipped() {

        let families = [
            family(0, vk::QueueFlags::GRAPHICS),
            family(1, vk::QueueFlags::GRAPHICS),
        ];

        let indices = find_queue_families(&families, |_| true);
        assert_eq!(indices.graphics, Some(1));
    }

    #[test]
    fn selection_stays_incomplete_without_present_support() {

        let families = [family(1, vk::QueueFlags::GRAPHICS)];

        let indices = find_queue_families(&families, |_| false);
        assert_eq!(indices.graphics, Some(0));
        assert_eq!(indices.present, None);
        assert_eq!(indices.is_complete(), false);
    }

    #[test]
    fn scan_stops_once_both_roles_are_found() {

        let families = [
            family(1, vk::QueueFlags::GRAPHICS),
            family(1, vk::QueueFlags::GRAPHICS),
        ];

        let mut probed = Vec::new();
        find_queue_families(&families, |index| {
            probed.push(index);
            true
        });

        // the second family is never probed for presentation.
        assert_eq!(probed, vec![0]);
    }
}
