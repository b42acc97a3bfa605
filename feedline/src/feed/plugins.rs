//! Post rendering plugins
//!
//! Each plugin claims some subset of posts and renders the body of their
//! card. The registry asks plugins in registration order and falls back to
//! [`DefaultPostPlugin`], so every post renders.

use crate::domain::entities::{Post, PostVariant};

/// Renders the body of the posts it claims
pub trait PostPlugin {
    /// Short name used in logs
    fn name(&self) -> &str;

    fn can_handle(&self, post: &Post) -> bool;

    fn render(&self, post: &Post) -> String;
}

/// Renders any post: the text, then a tag line for non-text variants
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPostPlugin;

impl PostPlugin for DefaultPostPlugin {
    fn name(&self) -> &str {
        "default"
    }

    fn can_handle(&self, _post: &Post) -> bool {
        true
    }

    fn render(&self, post: &Post) -> String {
        let mut buf = post.content.clone();
        if post.variant == PostVariant::Text {
            return buf;
        }

        let tag = post.variant.as_str().to_uppercase();
        match &post.media_url {
            Some(url) => buf.push_str(&format!("\n[{}: {}]", tag, url)),
            None => buf.push_str(&format!("\n[{}]", tag)),
        }
        buf
    }
}

/// Image posts: media reference first, caption below
#[derive(Debug, Clone, Copy, Default)]
pub struct ImagePostPlugin;

impl PostPlugin for ImagePostPlugin {
    fn name(&self) -> &str {
        "image"
    }

    fn can_handle(&self, post: &Post) -> bool {
        post.variant == PostVariant::Image
    }

    fn render(&self, post: &Post) -> String {
        format!("[IMAGE CONTENT: {}]\n{}", media_or_missing(post), post.content)
    }
}

/// Video posts: preview line, caption below
#[derive(Debug, Clone, Copy, Default)]
pub struct VideoPostPlugin;

impl PostPlugin for VideoPostPlugin {
    fn name(&self) -> &str {
        "video"
    }

    fn can_handle(&self, post: &Post) -> bool {
        post.variant == PostVariant::Video
    }

    fn render(&self, post: &Post) -> String {
        format!("[VIDEO PREVIEW: {}]\n{}", media_or_missing(post), post.content)
    }
}

fn media_or_missing(post: &Post) -> &str {
    post.media_url.as_deref().unwrap_or("missing media")
}

/// Ordered set of plugins with a fixed fallback
pub struct PluginRegistry {
    plugins: Vec<Box<dyn PostPlugin>>,
    fallback: DefaultPostPlugin,
}

impl PluginRegistry {
    /// Registry with only the default plugin
    pub fn new() -> Self {
        Self {
            plugins: Vec::new(),
            fallback: DefaultPostPlugin,
        }
    }

    /// Registry with the image and video plugins, in that order
    pub fn with_builtin_plugins() -> Self {
        Self::new()
            .with_plugin(ImagePostPlugin)
            .with_plugin(VideoPostPlugin)
    }

    pub fn with_plugin(mut self, plugin: impl PostPlugin + 'static) -> Self {
        self.register(Box::new(plugin));
        self
    }

    /// Add a plugin after every plugin already registered. When two plugins
    /// claim the same post, the earlier registration wins.
    pub fn register(&mut self, plugin: Box<dyn PostPlugin>) {
        tracing::debug!(plugin = plugin.name(), "plugin registered");
        self.plugins.push(plugin);
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// The plugin that renders `post`: first capable registration, else the default
    pub fn resolve(&self, post: &Post) -> &dyn PostPlugin {
        self.plugins
            .iter()
            .find(|plugin| plugin.can_handle(post))
            .map(|plugin| plugin.as_ref())
            .unwrap_or(&self.fallback)
    }

    pub fn render(&self, post: &Post) -> String {
        let plugin = self.resolve(post);
        tracing::trace!(post = %post.id, variant = %post.variant, plugin = plugin.name(), "dispatching post");
        plugin.render(post)
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}
