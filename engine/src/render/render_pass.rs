//! Render Pass Abstraction
//!
//! Provides a trait-based system for the editor's draw stages.
//! All passes record into the one `wgpu::RenderPass` the renderer opens per
//! frame, in a defined execution order.

use wgpu::{Device, Queue};

use crate::camera::Camera;
use crate::error::Result;
use crate::world::World;

/// Render pass execution priority (lower = earlier)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RenderPassPriority {
    /// Background rendering (skysphere)
    Background = 0,
    /// Main geometry pass (terrain)
    Geometry = 100,
}

/// GPU context shared between render passes
pub struct RenderContext<'a> {
    pub device: &'a Device,
    pub queue: &'a Queue,
    pub surface_format: wgpu::TextureFormat,
    pub sample_count: u32,
    pub width: u32,
    pub height: u32,
}

/// Scene state for a single frame
pub struct FrameContext<'a> {
    pub camera: &'a Camera,
    pub world: &'a World,
    pub delta_time: f32,
}

/// Trait for implementing render passes
pub trait RenderPass {
    /// Unique name for this pass (for debugging/profiling)
    fn name(&self) -> &'static str;

    /// Execution priority (determines render order)
    fn priority(&self) -> RenderPassPriority;

    /// Create GPU resources (called once before the first frame)
    fn initialize(&mut self, ctx: &RenderContext) -> Result<()>;

    /// Handle window resize
    fn resize(&mut self, _ctx: &RenderContext, _width: u32, _height: u32) {}

    /// Upload per-frame data (called each frame before render)
    fn update(&mut self, _ctx: &RenderContext, _frame: &FrameContext) {}

    /// Record draw commands into the frame's render pass
    fn render(&self, pass: &mut wgpu::RenderPass<'_>);
}

/// Manages a collection of render passes with automatic ordering
pub struct RenderPassManager {
    passes: Vec<Box<dyn RenderPass>>,
}

impl RenderPassManager {
    pub fn new() -> Self {
        Self { passes: Vec::new() }
    }

    /// Add a render pass, keeping passes in priority order.
    /// Passes with equal priority keep their insertion order.
    pub fn add_pass(&mut self, pass: Box<dyn RenderPass>) {
        self.passes.push(pass);
        self.passes.sort_by_key(|p| p.priority());
    }

    /// Handle window resize
    pub fn resize(&mut self, ctx: &RenderContext, width: u32, height: u32) {
        for pass in &mut self.passes {
            pass.resize(ctx, width, height);
        }
    }

    /// Update all passes
    pub fn update(&mut self, ctx: &RenderContext, frame: &FrameContext) {
        for pass in &mut self.passes {
            pass.update(ctx, frame);
        }
    }

    /// Render all passes in priority order
    pub fn render(&self, pass: &mut wgpu::RenderPass<'_>) {
        for render_pass in &self.passes {
            render_pass.render(pass);
        }
    }

    /// Pass names in render order
    pub fn pass_names(&self) -> Vec<&'static str> {
        self.passes.iter().map(|p| p.name()).collect()
    }
}

impl Default for RenderPassManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NamedPass {
        name: &'static str,
        priority: RenderPassPriority,
    }

    impl NamedPass {
        fn boxed(name: &'static str, priority: RenderPassPriority) -> Box<dyn RenderPass> {
            Box::new(Self { name, priority })
        }
    }

    impl RenderPass for NamedPass {
        fn name(&self) -> &'static str {
            self.name
        }

        fn priority(&self) -> RenderPassPriority {
            self.priority
        }

        fn initialize(&mut self, _ctx: &RenderContext) -> Result<()> {
            Ok(())
        }

        fn render(&self, _pass: &mut wgpu::RenderPass<'_>) {}
    }

    #[test]
    fn test_passes_sorted_by_priority() {
        let mut manager = RenderPassManager::new();
        manager.add_pass(NamedPass::boxed("terrain", RenderPassPriority::Geometry));
        manager.add_pass(NamedPass::boxed("sky", RenderPassPriority::Background));
        assert_eq!(manager.pass_names(), vec!["sky", "terrain"]);
    }

    #[test]
    fn test_equal_priority_keeps_insertion_order() {
        let mut manager = RenderPassManager::default();
        manager.add_pass(NamedPass::boxed("first", RenderPassPriority::Geometry));
        manager.add_pass(NamedPass::boxed("second", RenderPassPriority::Geometry));
        manager.add_pass(NamedPass::boxed("sky", RenderPassPriority::Background));
        assert_eq!(manager.pass_names(), vec!["sky", "first", "second"]);
    }
}
