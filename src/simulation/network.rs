//! Fixed-topology feed-forward network used as an agent's brain.
//!
//! One hidden layer, logistic sigmoid after both the hidden and the output
//! layer. Evolution never changes the shape, only the parameter values.

use ndarray::{Array1, Array2};
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::Uniform;

/// Behaviour the simulation needs from a brain.
pub trait Network: Clone {
    /// Forward pass. `inputs` must have exactly the configured input size.
    fn predict(&self, inputs: &Array1<f32>) -> Array1<f32>;

    /// Deep, fully independent duplicate.
    fn copy(&self) -> Self {
        self.clone()
    }

    /// Replaces every parameter `w` with `perturb(w)`.
    fn mutate(&mut self, perturb: impl FnMut(f32) -> f32);
}

/// A dense layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// Weight matrix (`output_size` × `input_size`).
    pub weights: Array2<f32>,
    /// Bias vector (`output_size`).
    pub biases: Array1<f32>,
}

impl Layer {
    /// Creates a layer with weights and biases drawn from `[-1, 1)`.
    pub fn new_random(input_size: usize, output_size: usize) -> Self {
        Self {
            weights: Array2::random((output_size, input_size), Uniform::new(-1.0, 1.0)),
            biases: Array1::random(output_size, Uniform::new(-1.0, 1.0)),
        }
    }

    /// Creates a layer whose parameters are all zero.
    pub fn zeroed(input_size: usize, output_size: usize) -> Self {
        Self {
            weights: Array2::zeros((output_size, input_size)),
            biases: Array1::zeros(output_size),
        }
    }

    /// Affine transform followed by the sigmoid.
    #[inline]
    pub fn forward(&self, inputs: &Array1<f32>) -> Array1<f32> {
        let mut output = self.weights.dot(inputs);
        output += &self.biases;
        output.mapv_inplace(sigmoid);
        output
    }

    fn apply(&mut self, perturb: &mut impl FnMut(f32) -> f32) {
        self.weights.mapv_inplace(|w| perturb(w));
        self.biases.mapv_inplace(|b| perturb(b));
    }
}

/// Input → hidden → output network.
#[derive(Debug, Clone, PartialEq)]
pub struct NeuralNetwork {
    input_size: usize,
    hidden_size: usize,
    output_size: usize,
    hidden: Layer,
    output: Layer,
}

impl NeuralNetwork {
    /// Creates a network with random parameters.
    pub fn new(input_size: usize, hidden_size: usize, output_size: usize) -> Self {
        Self {
            input_size,
            hidden_size,
            output_size,
            hidden: Layer::new_random(input_size, hidden_size),
            output: Layer::new_random(hidden_size, output_size),
        }
    }

    /// Creates a network whose parameters are all zero; every output is 0.5.
    pub fn zeroed(input_size: usize, hidden_size: usize, output_size: usize) -> Self {
        Self::from_layers(
            Layer::zeroed(input_size, hidden_size),
            Layer::zeroed(hidden_size, output_size),
        )
    }

    /// Builds a network from explicit layers.
    ///
    /// # Panics
    ///
    /// Panics if the layer shapes do not chain.
    pub fn from_layers(hidden: Layer, output: Layer) -> Self {
        let (hidden_size, input_size) = hidden.weights.dim();
        let (output_size, output_inputs) = output.weights.dim();
        assert_eq!(hidden_size, output_inputs, "layer shapes do not chain");
        assert_eq!(hidden.biases.len(), hidden_size, "hidden bias length");
        assert_eq!(output.biases.len(), output_size, "output bias length");

        Self {
            input_size,
            hidden_size,
            output_size,
            hidden,
            output,
        }
    }

    /// Number of inputs.
    pub fn input_size(&self) -> usize {
        self.input_size
    }

    /// Number of hidden units.
    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    /// Number of outputs.
    pub fn output_size(&self) -> usize {
        self.output_size
    }

    /// Total number of weights and biases.
    pub fn parameter_count(&self) -> usize {
        self.hidden.weights.len()
            + self.hidden.biases.len()
            + self.output.weights.len()
            + self.output.biases.len()
    }

    /// Flattens all weights and biases into a single vector, hidden layer first.
    pub fn to_flat_vector(&self) -> Vec<f32> {
        let mut flat = Vec::with_capacity(self.parameter_count());
        for layer in [&self.hidden, &self.output] {
            flat.extend(layer.weights.iter().copied());
            flat.extend(layer.biases.iter().copied());
        }
        flat
    }
}

impl Network for NeuralNetwork {
    #[inline]
    fn predict(&self, inputs: &Array1<f32>) -> Array1<f32> {
        debug_assert_eq!(inputs.len(), self.input_size, "input size mismatch");
        self.output.forward(&self.hidden.forward(inputs))
    }

    fn mutate(&mut self, mut perturb: impl FnMut(f32) -> f32) {
        self.hidden.apply(&mut perturb);
        self.output.apply(&mut perturb);
    }
}

#[inline]
fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}
