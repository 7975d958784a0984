
use ash::vk;

use vkbase::context::VkDevice;
use vkbase::ci::shader::{ShaderModuleCI, ShaderStageCI};
use vkbase::ci::pipeline::PipelineLayoutCI;
use vkbase::VkResult;

use std::ptr;

const SHADER_VERTEX_PATH  : &'static str = "Shaders/shader.vert";
const SHADER_FRAGMENT_PATH: &'static str = "Shaders/shaders.frag";

/// Load the two shader stages and assemble the full fixed function state of
/// the graphics pipeline, returning the pipeline layout, which is the only
/// piece that outlives this call.
///
/// The pipeline object itself is not created: without rendering work there is
/// no render pass for it to target. The shader modules are destroyed again
/// once the stage descriptions have served their purpose.
pub fn setup_pipeline_state(device: &VkDevice, dimension: vk::Extent2D) -> VkResult<vk::PipelineLayout> {

    let vert_module = device.build(&ShaderModuleCI::from_spirv(SHADER_VERTEX_PATH))?;
    let frag_module = match device.build(&ShaderModuleCI::from_spirv(SHADER_FRAGMENT_PATH)) {
        | Ok(module) => module,
        | Err(error) => {
            device.discard(vert_module);
            return Err(error)
        },
    };

    let vert_stage = ShaderStageCI::new(vk::ShaderStageFlags::VERTEX, vert_module);
    let frag_stage = ShaderStageCI::new(vk::ShaderStageFlags::FRAGMENT, frag_module);
    let shader_stages = [vert_stage.build(), frag_stage.build()];

    // The triangle is hardcoded in the vertex shader, so no vertex data is fed in.
    let vertex_input_state = vk::PipelineVertexInputStateCreateInfo {
        s_type: vk::StructureType::PIPELINE_VERTEX_INPUT_STATE_CREATE_INFO,
        p_next: ptr::null(),
        flags : vk::PipelineVertexInputStateCreateFlags::empty(),
        vertex_binding_description_count: 0,
        p_vertex_binding_descriptions   : ptr::null(),
        vertex_attribute_description_count: 0,
        p_vertex_attribute_descriptions   : ptr::null(),
    };

    // Input assembly state describes how primitives are assembled.
    let input_assembly_state = vk::PipelineInputAssemblyStateCreateInfo {
        s_type: vk::StructureType::PIPELINE_INPUT_ASSEMBLY_STATE_CREATE_INFO,
        p_next: ptr::null(),
        flags : vk::PipelineInputAssemblyStateCreateFlags::empty(),
        topology: vk::PrimitiveTopology::TRIANGLE_LIST,
        primitive_restart_enable: vk::FALSE,
    };

    // One static viewport and scissor covering the whole swapchain extent.
    let viewports = [
        vk::Viewport {
            x: 0.0,
            y: 0.0,
            width : dimension.width  as f32,
            height: dimension.height as f32,
            min_depth: 0.0,
            max_depth: 1.0,
        },
    ];
    let scissors = [
        vk::Rect2D {
            offset: vk::Offset2D { x: 0, y: 0 },
            extent: dimension,
        },
    ];
    let viewport_state = vk::PipelineViewportStateCreateInfo {
        s_type: vk::StructureType::PIPELINE_VIEWPORT_STATE_CREATE_INFO,
        p_next: ptr::null(),
        flags : vk::PipelineViewportStateCreateFlags::empty(),
        viewport_count : viewports.len() as _,
        p_viewports    : viewports.as_ptr(),
        scissor_count  : scissors.len() as _,
        p_scissors     : scissors.as_ptr(),
    };

    // Rasterization state
    let rasterization_state = vk::PipelineRasterizationStateCreateInfo {
        s_type: vk::StructureType::PIPELINE_RASTERIZATION_STATE_CREATE_INFO,
        p_next: ptr::null(),
        flags : vk::PipelineRasterizationStateCreateFlags::empty(),
        depth_clamp_enable         : vk::FALSE,
        rasterizer_discard_enable  : vk::FALSE,
        polygon_mode               : vk::PolygonMode::FILL,
        cull_mode                  : vk::CullModeFlags::BACK,
        front_face                 : vk::FrontFace::CLOCKWISE,
        depth_bias_enable          : vk::FALSE,
        depth_bias_constant_factor : 0.0,
        depth_bias_clamp           : 0.0,
        depth_bias_slope_factor    : 0.0,
        line_width                 : 1.0,
    };

    // Multi sampling state; the state must still be set even while disabled.
    let multisample_state = vk::PipelineMultisampleStateCreateInfo {
        s_type: vk::StructureType::PIPELINE_MULTISAMPLE_STATE_CREATE_INFO,
        p_next: ptr::null(),
        flags : vk::PipelineMultisampleStateCreateFlags::empty(),
        rasterization_samples: vk::SampleCountFlags::TYPE_1,
        sample_shading_enable: vk::FALSE,
        min_sample_shading: 0.0,
        p_sample_mask: ptr::null(),
        alpha_to_coverage_enable: vk::FALSE,
        alpha_to_one_enable     : vk::FALSE,
    };

    // Color blend state needs one attachment state per color attachment,
    // even with blending disabled.
    let blend_attachments = [
        vk::PipelineColorBlendAttachmentState {
            blend_enable: vk::FALSE,
            src_color_blend_factor: vk::BlendFactor::ONE,
            dst_color_blend_factor: vk::BlendFactor::ZERO,
            color_blend_op: vk::BlendOp::ADD,
            src_alpha_blend_factor: vk::BlendFactor::ONE,
            dst_alpha_blend_factor: vk::BlendFactor::ZERO,
            alpha_blend_op: vk::BlendOp::ADD,
            color_write_mask: vk::ColorComponentFlags::R | vk::ColorComponentFlags::G | vk::ColorComponentFlags::B | vk::ColorComponentFlags::A,
        },
    ];
    let blend_state = vk::PipelineColorBlendStateCreateInfo {
        s_type: vk::StructureType::PIPELINE_COLOR_BLEND_STATE_CREATE_INFO,
        p_next: ptr::null(),
        flags : vk::PipelineColorBlendStateCreateFlags::empty(),
        logic_op_enable: vk::FALSE,
        logic_op       : vk::LogicOp::COPY,
        attachment_count: blend_attachments.len() as _,
        p_attachments   : blend_attachments.as_ptr(),
        blend_constants : [0.0; 4],
    };

    let pipeline_layout = match device.build(&PipelineLayoutCI::new()) {
        | Ok(layout) => layout,
        | Err(error) => {
            device.discard(frag_module);
            device.discard(vert_module);
            return Err(error)
        },
    };

    // The create info is assembled completely so every state above is tied
    // together; only the render pass is missing, and without rendering work
    // none exists to point it at.
    let _pipeline_ci = vk::GraphicsPipelineCreateInfo {
        s_type: vk::StructureType::GRAPHICS_PIPELINE_CREATE_INFO,
        p_next: ptr::null(),
        flags : vk::PipelineCreateFlags::empty(),
        stage_count: shader_stages.len() as _,
        p_stages   : shader_stages.as_ptr(),
        p_vertex_input_state   : &vertex_input_state,
        p_input_assembly_state : &input_assembly_state,
        p_tessellation_state   : ptr::null(),
        p_viewport_state       : &viewport_state,
        p_rasterization_state  : &rasterization_state,
        p_multisample_state    : &multisample_state,
        p_depth_stencil_state  : ptr::null(),
        p_color_blend_state    : &blend_state,
        p_dynamic_state        : ptr::null(),
        layout: pipeline_layout,
        render_pass: vk::RenderPass::null(),
        subpass: 0,
        base_pipeline_handle: vk::Pipeline::null(),
        base_pipeline_index : -1,
    };

    // the modules were only needed to describe the two stages.
    device.discard(frag_module);
    device.discard(vert_module);

    Ok(pipeline_layout)
}
