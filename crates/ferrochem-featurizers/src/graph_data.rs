use crate::error::FeaturizerError;
use candle_core::{Device, Tensor};
use ndarray::{Array1, Array2};

/// Featurized molecule graph
///
/// Field shapes, with `n` atoms and `e = 2 * bonds` directed edges:
/// - `node_features`: `[n, atom_fdim]`
/// - `edge_index`: `[2, e]`, source row then destination row
/// - `global_features`: `[num_global_features]`, possibly empty
/// - `mapping`: `[e + 1, max_in_degree]`
/// - `node_features_zero_padded`: `[n + 1, atom_fdim]`
/// - `concatenated_features_zero_padded`: `[e + 1, atom_fdim + bond_fdim]`
#[derive(Debug, Clone, PartialEq)]
pub struct GraphData {
    pub node_features: Array2<f32>,
    pub edge_index: Array2<i64>,
    pub global_features: Array1<f32>,
    pub mapping: Array2<i64>,
    pub node_features_zero_padded: Array2<f32>,
    pub concatenated_features_zero_padded: Array2<f32>,
}

/// [`GraphData`] moved onto a candle device.
#[derive(Debug, Clone)]
pub struct GraphTensors {
    pub node_features: Tensor,
    pub edge_index: Tensor,
    pub global_features: Tensor,
    pub mapping: Tensor,
    pub node_features_zero_padded: Tensor,
    pub concatenated_features_zero_padded: Tensor,
}

fn matrix_to_tensor<T: candle_core::WithDType>(array: &Array2<T>, device: &Device) -> Result<Tensor, FeaturizerError> {
    let data: Vec<T> = array.iter().copied().collect();
    Ok(Tensor::from_vec(data, array.dim(), device)?)
}

impl GraphData {
    pub fn num_nodes(&self) -> usize {
        self.node_features.nrows()
    }

    pub fn num_node_features(&self) -> usize {
        self.node_features.ncols()
    }

    /// Directed edges, two per bond.
    pub fn num_edges(&self) -> usize {
        self.edge_index.ncols()
    }

    pub fn to_tensors(&self, device: &Device) -> Result<GraphTensors, FeaturizerError> {
        Ok(GraphTensors {
            node_features: matrix_to_tensor(&self.node_features, device)?,
            edge_index: matrix_to_tensor(&self.edge_index, device)?,
            global_features: Tensor::from_vec(self.global_features.to_vec(), self.global_features.len(), device)?,
            mapping: matrix_to_tensor(&self.mapping, device)?,
            node_features_zero_padded: matrix_to_tensor(&self.node_features_zero_padded, device)?,
            concatenated_features_zero_padded: matrix_to_tensor(&self.concatenated_features_zero_padded, device)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use candle_core::DType;
    use ndarray::array;

    fn two_atom_graph() -> GraphData {
        GraphData {
            node_features: Array2::ones((2, 3)),
            edge_index: array![[0, 1], [1, 0]],
            global_features: Array1::zeros(0),
            mapping: array![[0], [0], [0]],
            node_features_zero_padded: Array2::zeros((3, 3)),
            concatenated_features_zero_padded: Array2::zeros((3, 5)),
        }
    }

    #[test]
    fn test_counts() {
        let graph = two_atom_graph();
        assert_eq!(graph.num_nodes(), 2);
        assert_eq!(graph.num_node_features(), 3);
        assert_eq!(graph.num_edges(), 2);
    }

    #[test]
    fn test_to_tensors() -> Result<(), FeaturizerError> {
        let tensors = two_atom_graph().to_tensors(&Device::Cpu)?;
        assert_eq!(tensors.node_features.dims(), &[2, 3]);
        assert_eq!(tensors.node_features.dtype(), DType::F32);
        assert_eq!(tensors.edge_index.dtype(), DType::I64);
        assert_eq!(tensors.edge_index.to_vec2::<i64>()?, vec![vec![0, 1], vec![1, 0]]);
        assert_eq!(tensors.global_features.dims(), &[0]);
        assert_eq!(tensors.concatenated_features_zero_padded.dims(), &[3, 5]);
        Ok(())
    }
}
