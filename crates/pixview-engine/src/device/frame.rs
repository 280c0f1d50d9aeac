/// One acquired swapchain image plus the encoder recording into it.
///
/// Hand it back through [`present`](Self::present) promptly; holding the surface
/// texture blocks acquisition of the next one.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

impl GpuFrame {
    /// Submits the recorded commands on `queue` and presents the image.
    pub fn present(self, queue: &wgpu::Queue) {
        queue.submit(std::iter::once(self.encoder.finish()));
        drop(self.view);
        self.surface_texture.present();
    }
}
