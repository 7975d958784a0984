
mod physical;
mod logical;
mod queue;

pub use self::logical::{VkLogicalDevice, VkQueue, QueueHandles};
pub use self::physical::{VkPhysicalDevice, PhysicalDevConfig, DeviceExtensionType};
pub use self::queue::QueueFamilyIndices;


/// The physical/logical device pair every downstream object is created from.
pub struct VkDevice {

    pub logic : logical::VkLogicalDevice,
    pub phy   : physical::VkPhysicalDevice,
}

impl VkDevice {

    #[inline]
    pub fn build<T>(&self, ci: &T) -> crate::VkResult<T::ObjectType>
        where
            T: crate::ci::VkObjectBuildableCI {
        ci.build(self)
    }

    #[inline]
    pub fn discard(&self, object: impl VkObjectDiscardable) {
        object.discard(self);
    }

    pub(crate) fn drop_self(self) {
        self.logic.discard();
    }
}

/// A Vulkan object that is destroyed through its owning device.
pub trait VkObjectDiscardable: Copy {

    fn discard(self, device: &VkDevice);
}
