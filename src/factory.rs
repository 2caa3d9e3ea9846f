//! Factory capability
//!
//!     The converter calls a [`Factory`] once per element node, after its children have been
//!     converted. What the factory returns decides what the node becomes in its parent:
//!
//!     | Returned               | Effect in the parent                                  |
//!     |------------------------|-------------------------------------------------------|
//!     | `Built::Single(el)`    | `el` takes the node's slot (possibly edited props)    |
//!     | `Built::Many(children)`| the node is unwrapped, `children` spliced in its slot |
//!     | `Built::None`          | the node and its whole subtree are dropped            |
//!
//!     Errors are returned as the factory's own `Error` type and abort the conversion.

use crate::element::{create_element, Child, Element, Props};
use std::convert::Infallible;

/// What a factory produced for one element node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Built {
    Single(Element),
    Many(Vec<Child>),
    None,
}

impl From<Element> for Built {
    fn from(element: Element) -> Self {
        Built::Single(element)
    }
}

impl From<Vec<Child>> for Built {
    fn from(children: Vec<Child>) -> Self {
        Built::Many(children)
    }
}

impl From<Option<Element>> for Built {
    fn from(element: Option<Element>) -> Self {
        element.map_or(Built::None, Built::Single)
    }
}

/// Element construction capability.
pub trait Factory {
    type Error;

    fn create(&mut self, tag: &str, props: Props, children: Vec<Child>)
        -> Result<Built, Self::Error>;
}

impl<F: Factory + ?Sized> Factory for &mut F {
    type Error = F::Error;

    fn create(
        &mut self,
        tag: &str,
        props: Props,
        children: Vec<Child>,
    ) -> Result<Built, Self::Error> {
        (**self).create(tag, props, children)
    }
}

/// The default factory: builds every element as given, no filtering.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreateElement;

impl Factory for CreateElement {
    type Error = Infallible;

    fn create(
        &mut self,
        tag: &str,
        props: Props,
        children: Vec<Child>,
    ) -> Result<Built, Self::Error> {
        Ok(Built::Single(create_element(tag, props, children)))
    }
}

/// Factory backed by an infallible closure. See [`from_fn`].
#[derive(Debug, Clone, Copy)]
pub struct FnFactory<F>(F);

/// Factory backed by a fallible closure. See [`try_from_fn`].
#[derive(Debug, Clone, Copy)]
pub struct TryFnFactory<F>(F);

/// Wrap a closure as a factory.
///
/// ```ignore
/// let mut strip = from_fn(|tag: &str, mut props: Props, children: Vec<Child>| {
///     props.shift_remove("data-test");
///     Built::Single(create_element(tag, props, children))
/// });
/// ```
pub fn from_fn<F>(f: F) -> FnFactory<F>
where
    F: FnMut(&str, Props, Vec<Child>) -> Built,
{
    FnFactory(f)
}

/// Wrap a fallible closure as a factory. Its error aborts the conversion.
pub fn try_from_fn<F, E>(f: F) -> TryFnFactory<F>
where
    F: FnMut(&str, Props, Vec<Child>) -> Result<Built, E>,
{
    TryFnFactory(f)
}

impl<F> Factory for FnFactory<F>
where
    F: FnMut(&str, Props, Vec<Child>) -> Built,
{
    type Error = Infallible;

    fn create(
        &mut self,
        tag: &str,
        props: Props,
        children: Vec<Child>,
    ) -> Result<Built, Self::Error> {
        Ok((self.0)(tag, props, children))
    }
}

impl<F, E> Factory for TryFnFactory<F>
where
    F: FnMut(&str, Props, Vec<Child>) -> Result<Built, E>,
{
    type Error = E;

    fn create(
        &mut self,
        tag: &str,
        props: Props,
        children: Vec<Child>,
    ) -> Result<Built, Self::Error> {
        (self.0)(tag, props, children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_element_factory() {
        let built = CreateElement
            .create("p", Props::new(), vec!["x".into()])
            .unwrap();
        assert_eq!(
            built,
            Built::Single(create_element("p", Props::new(), vec!["x".into()]))
        );
    }

    #[test]
    fn test_closure_factory() {
        let mut calls = 0;
        let mut factory = from_fn(|_tag: &str, _props: Props, children: Vec<Child>| {
            calls += 1;
            Built::Many(children)
        });
        let built = factory.create("span", Props::new(), vec!["a".into()]).unwrap();
        assert_eq!(built, Built::Many(vec!["a".into()]));
        drop(factory);
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_fallible_closure_factory() {
        let mut factory = try_from_fn(|tag: &str, _props: Props, _children: Vec<Child>| {
            Err::<Built, String>(format!("refusing {}", tag))
        });
        assert_eq!(
            factory.create("script", Props::new(), vec![]),
            Err("refusing script".to_string())
        );
    }

    #[test]
    fn test_built_from_option() {
        assert_eq!(Built::from(None::<Element>), Built::None);
    }
}
