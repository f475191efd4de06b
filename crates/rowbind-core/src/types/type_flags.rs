//! Modifier flags for class types.

use bitflags::bitflags;

bitflags! {
    /// Modifiers of a class type.
    ///
    /// ```
    /// use rowbind_core::TypeFlags;
    ///
    /// let flags = TypeFlags::ABSTRACT | TypeFlags::BUILTIN;
    /// assert!(flags.contains(TypeFlags::ABSTRACT));
    /// assert!(!flags.contains(TypeFlags::FINAL));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TypeFlags: u8 {
        /// The class cannot be instantiated directly.
        const ABSTRACT = 1 << 0;
        /// The class cannot be extended.
        const FINAL = 1 << 1;
        /// Part of the built-in type universe.
        const BUILTIN = 1 << 2;
        /// Boxed counterpart of a primitive type.
        const BOXED = 1 << 3;
    }
}
