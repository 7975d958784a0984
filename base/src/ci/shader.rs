
use ash::vk;
use ash::version::DeviceV1_0;

use crate::context::{VkDevice, VkObjectDiscardable};
use crate::ci::{VulkanCI, VkObjectBuildableCI};
use crate::error::{VkResult, VkError};

use std::path::{Path, PathBuf};
use std::fs::File;
use std::io::Read;
use std::ffi::CString;
use std::ptr;

// ---------------------------------------------------------------------------------------------------
/// Wrapper class for vk::ShaderModuleCreateInfo.
///
/// The shader is read from disk as precompiled bytecode; nothing is compiled
/// at runtime.
#[derive(Debug, Clone)]
pub struct ShaderModuleCI {

    ci: vk::ShaderModuleCreateInfo,
    path: PathBuf,
}

impl VulkanCI<vk::ShaderModuleCreateInfo> for ShaderModuleCI {

    fn default_ci() -> vk::ShaderModuleCreateInfo {

        vk::ShaderModuleCreateInfo {
            s_type    : vk::StructureType::SHADER_MODULE_CREATE_INFO,
            p_next    : ptr::null(),
            flags     : vk::ShaderModuleCreateFlags::empty(),
            code_size : 0,
            p_code    : ptr::null(),
        }
    }
}

impl ShaderModuleCI {

    pub fn from_spirv(path: impl AsRef<Path>) -> ShaderModuleCI {

        ShaderModuleCI {
            ci: ShaderModuleCI::default_ci(),
            path: PathBuf::from(path.as_ref()),
        }
    }
}

impl VkObjectBuildableCI for ShaderModuleCI {
    type ObjectType = vk::ShaderModule;

    fn build(&self, device: &VkDevice) -> VkResult<vk::ShaderModule> {

        let codes = load_bytecode(&self.path)?;

        let shader_module_ci = vk::ShaderModuleCreateInfo {
            code_size : codes.len(),
            p_code    : codes.as_ptr() as _,
            ..self.ci
        };

        let module = unsafe {
            device.logic.handle.create_shader_module(&shader_module_ci, None)
                .or(Err(VkError::create("Shader Module")))?
        };
        Ok(module)
    }
}

impl VkObjectDiscardable for vk::ShaderModule {

    fn discard(self, device: &VkDevice) {
        unsafe {
            device.logic.handle.destroy_shader_module(self, None);
        }
    }
}
// ---------------------------------------------------------------------------------------------------

// ---------------------------------------------------------------------------------------------------
/// Wrapper class for vk::PipelineShaderStageCreateInfo.
#[derive(Debug, Clone)]
pub struct ShaderStageCI {

    ci: vk::PipelineShaderStageCreateInfo,

    main: CString,
}

impl VulkanCI<vk::PipelineShaderStageCreateInfo> for ShaderStageCI {

    fn default_ci() -> vk::PipelineShaderStageCreateInfo {

        vk::PipelineShaderStageCreateInfo {
            s_type : vk::StructureType::PIPELINE_SHADER_STAGE_CREATE_INFO,
            p_next : ptr::null(),
            flags  : vk::PipelineShaderStageCreateFlags::empty(),
            p_name : ptr::null(),
            stage  : vk::ShaderStageFlags::empty(),
            module : vk::ShaderModule::null(),
            p_specialization_info: ptr::null(),
        }
    }
}

impl ShaderStageCI {

    pub fn new(stage: vk::ShaderStageFlags, module: vk::ShaderModule) -> ShaderStageCI {

        ShaderStageCI {
            ci: vk::PipelineShaderStageCreateInfo {
                stage, module,
                ..ShaderStageCI::default_ci()
            },
            main: CString::new("main")
                .expect("Invalid name of shader entry point."),
        }
    }

    pub fn main(mut self, name: impl AsRef<str>) -> ShaderStageCI {
        self.main = CString::new(name.as_ref().to_owned())
            .expect("Invalid name of shader entry point."); self
    }

    /// The `self.main` string must outlive the returned struct.
    pub fn build(&self) -> vk::PipelineShaderStageCreateInfo {

        vk::PipelineShaderStageCreateInfo {
            p_name: self.main.as_ptr(),
            ..self.ci
        }
    }
}
// ---------------------------------------------------------------------------------------------------


// helper functions. ---------------------------------------------------------------------------------
fn load_bytecode(path: &Path) -> VkResult<Vec<u8>> {

    let mut file = File::open(path)
        .map_err(|_| VkError::path(path))?;

    let mut bytecode = Vec::new();
    file.read_to_end(&mut bytecode)
        .map_err(|_| VkError::path(path))?;

    Ok(bytecode)
}
// ---------------------------------------------------------------------------------------------------
