//! Entity implementation

slotmap::new_key_type! {
    /// Entity identifier
    ///
    /// An opaque, generational handle. A handle to a despawned entity never
    /// aliases a later one.
    pub struct Entity;
}
