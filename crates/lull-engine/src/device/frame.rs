/// One acquired swapchain image plus the encoder recording into it.
///
/// Must be handed back to [`super::Gpu::submit`] promptly; while it lives no
/// further image can be acquired.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

impl GpuFrame {
    /// Size of the target in framebuffer pixels.
    pub fn size_px(&self) -> (u32, u32) {
        let t = &self.surface_texture.texture;
        (t.width(), t.height())
    }
}
