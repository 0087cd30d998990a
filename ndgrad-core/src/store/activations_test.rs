use super::*;
use crate::config::MissingGradientPolicy;
use crate::node::NodeArena;

fn arr(data: &[f32]) -> NDArray {
    NDArray::from_slice(data).expect("Failed to create test array")
}

#[test]
fn test_set_then_get_returns_stored_array() -> Result<(), NdGradError> {
    let mut arena = NodeArena::new();
    let x = arena.node(&[3])?;
    let mut activations = ActivationStore::new();

    activations.set(x, arr(&[1.0, 2.0, 3.0]));
    assert!(activations.has(x));
    assert_eq!(activations.get(x)?.data(), &[1.0, 2.0, 3.0]);
    assert_eq!(activations.len(), 1);
    Ok(())
}

#[test]
fn test_set_overwrites() -> Result<(), NdGradError> {
    let mut arena = NodeArena::new();
    let x = arena.node(&[2])?;
    let mut activations = ActivationStore::new();

    activations.set(x, arr(&[1.0, 1.0]));
    activations.set(x, arr(&[5.0, 6.0]));
    assert_eq!(activations.get(x)?.data(), &[5.0, 6.0]);
    assert_eq!(activations.len(), 1);
    Ok(())
}

#[test]
fn test_get_missing_is_not_found() -> Result<(), NdGradError> {
    let mut arena = NodeArena::new();
    let x = arena.node(&[1])?;
    let activations = ActivationStore::new();
    assert_eq!(
        activations.get(x),
        Err(NdGradError::NotFound {
            node: x,
            store: StoreKind::Activations
        })
    );
    Ok(())
}

#[test]
fn test_dispose_removes_presence() -> Result<(), NdGradError> {
    let mut arena = NodeArena::new();
    let x = arena.node(&[2])?;
    let mut activations = ActivationStore::new();

    activations.set(x, arr(&[1.0, 2.0]));
    activations.dispose_array(x);
    assert!(!activations.has(x));
    assert!(matches!(
        activations.get(x),
        Err(NdGradError::NotFound { .. })
    ));

    // Disposing again is a no-op.
    activations.dispose_array(x);
    assert!(activations.is_empty());
    Ok(())
}

#[test]
fn test_nodes_are_keyed_by_identity_not_shape() -> Result<(), NdGradError> {
    let mut arena = NodeArena::new();
    let a = arena.node(&[2])?;
    let b = arena.node(&[2])?;
    let mut activations = ActivationStore::new();

    activations.set(a, arr(&[1.0, 2.0]));
    assert!(!activations.has(b));
    activations.set(b, arr(&[3.0, 4.0]));
    assert_eq!(activations.get(a)?.data(), &[1.0, 2.0]);
    assert_eq!(activations.get(b)?.data(), &[3.0, 4.0]);
    Ok(())
}

#[test]
fn test_take_transfers_ownership_out() -> Result<(), NdGradError> {
    let mut arena = NodeArena::new();
    let x = arena.node(&[1])?;
    let mut activations = ActivationStore::new();

    activations.set(x, arr(&[9.0]));
    let owned = activations.take(x)?;
    assert_eq!(owned.data(), &[9.0]);
    assert!(!activations.has(x));
    assert!(activations.take(x).is_err());
    Ok(())
}

#[test]
fn test_clear_and_nodes() -> Result<(), NdGradError> {
    let mut arena = NodeArena::new();
    let a = arena.node(&[1])?;
    let b = arena.node(&[1])?;
    let mut activations =
        ActivationStore::with_config(GradientConfig::new().warn_on_non_finite(true));

    activations.set(a, arr(&[1.0]));
    activations.set(b, arr(&[f32::NAN]));
    let mut nodes: Vec<Node> = activations.nodes().collect();
    nodes.sort();
    assert_eq!(nodes, vec![a, b]);
    // Non-finite values are stored untouched.
    assert!(activations.get(b)?.data()[0].is_nan());

    activations.clear();
    assert!(activations.is_empty());
    assert!(!activations.has(a));
    Ok(())
}

#[test]
fn test_missing_gradient_policy_does_not_apply_to_activations() -> Result<(), NdGradError> {
    let mut arena = NodeArena::new();
    let x = arena.node(&[2])?;
    let config = GradientConfig::new().missing_gradient(MissingGradientPolicy::ImplicitZero);
    let activations = ActivationStore::with_config(config);

    assert_eq!(
        activations.get(x),
        Err(NdGradError::NotFound {
            node: x,
            store: StoreKind::Activations,
        })
    );
    Ok(())
}
