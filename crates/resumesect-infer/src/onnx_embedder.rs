//! ONNX-based transformer embedder.
//!
//! Loads an exported HuggingFace encoder (`model.onnx` + `tokenizer.json`) and
//! mean-pools the token embeddings under the attention mask, which is how
//! document embeddings are built from a plain encoder such as
//! distilbert-base-uncased. Requires the `onnx` feature.

#[cfg(feature = "onnx")]
mod inner {
    use std::path::Path;

    use ndarray::Array1;
    use ort::session::Session;
    use ort::value::Tensor;
    use parking_lot::Mutex;
    use resumesect_core::{Error, Result};
    use tokenizers::Tokenizer;
    use tracing::info;

    use crate::embedder::{EmbedderBackend, EmbeddingResult};

    /// Maximum sequence length for BERT-family encoders.
    const MAX_SEQ_LEN: usize = 512;

    fn inference_err(context: &str, e: impl std::fmt::Display) -> Error {
        Error::Inference(format!("{}: {}", context, e))
    }

    /// Reject encodings the model cannot see in full. A truncated input
    /// embeds like its prefix, so appended lines would look like ties.
    fn check_context(token_count: usize) -> Result<usize> {
        if token_count > MAX_SEQ_LEN {
            return Err(Error::Inference(format!(
                "input exceeds model context: {} tokens > {}",
                token_count, MAX_SEQ_LEN
            )));
        }
        Ok(token_count)
    }

    /// Transformer embedder running on ONNX Runtime.
    pub struct OnnxEmbedder {
        session: Mutex<Session>,
        tokenizer: Tokenizer,
        model_id: String,
        /// DistilBERT exports take no `token_type_ids` input.
        token_type_ids: bool,
        dimension: usize,
    }

    impl OnnxEmbedder {
        /// Load the model and tokenizer from `model_dir`.
        ///
        /// Expects:
        /// - `model_dir/model.onnx`
        /// - `model_dir/tokenizer.json`
        pub fn load(model_dir: &Path, model_id: &str) -> Result<Self> {
            let model_path = model_dir.join("model.onnx");
            let tokenizer_path = model_dir.join("tokenizer.json");

            if !model_path.exists() {
                return Err(Error::Config(format!(
                    "Model not found: {}",
                    model_path.display()
                )));
            }
            if !tokenizer_path.exists() {
                return Err(Error::Config(format!(
                    "Tokenizer not found: {}",
                    tokenizer_path.display()
                )));
            }

            // With load-dynamic, ORT_DYLIB_PATH must point to libonnxruntime.
            ort::init().commit();

            let session = Session::builder()
                .map_err(|e| inference_err("session builder", e))?
                .with_intra_threads(2)
                .map_err(|e| inference_err("intra threads", e))?
                .commit_from_file(&model_path)
                .map_err(|e| inference_err("loading ONNX model", e))?;

            let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
                .map_err(|e| inference_err("loading tokenizer", e))?;
            // Exported tokenizers often truncate; overlong input must reach check_context.
            tokenizer
                .with_truncation(None)
                .map_err(|e| inference_err("disabling truncation", e))?;

            let mut embedder = Self {
                session: Mutex::new(session),
                tokenizer,
                model_id: model_id.to_string(),
                token_type_ids: !model_id.to_lowercase().contains("distilbert"),
                dimension: 0,
            };

            // Probe once so dimension() is known before the first parse.
            embedder.dimension = embedder.infer("probe")?.len();

            info!(
                "ONNX embedder loaded: model={}, dim={}, path={}",
                embedder.model_id,
                embedder.dimension,
                model_path.display()
            );
            Ok(embedder)
        }

        fn infer(&self, text: &str) -> Result<Array1<f32>> {
            let encoding = self
                .tokenizer
                .encode(text, true)
                .map_err(|e| inference_err("tokenization", e))?;

            let seq_len = check_context(encoding.get_ids().len())?;
            let attention_mask = encoding.get_attention_mask();

            let ids: Vec<i64> = encoding
                .get_ids()
                .iter()
                .map(|&id| id as i64)
                .collect();
            let mask: Vec<i64> = attention_mask.iter().map(|&m| m as i64).collect();

            let ids_tensor = Tensor::from_array(([1usize, seq_len], ids))
                .map_err(|e| inference_err("ids tensor", e))?;
            let mask_tensor = Tensor::from_array(([1usize, seq_len], mask))
                .map_err(|e| inference_err("mask tensor", e))?;

            let mut session = self.session.lock();
            let outputs = if self.token_type_ids {
                let type_ids_tensor = Tensor::from_array(([1usize, seq_len], vec![0i64; seq_len]))
                    .map_err(|e| inference_err("type ids tensor", e))?;
                session.run(ort::inputs![ids_tensor, mask_tensor, type_ids_tensor])
            } else {
                session.run(ort::inputs![ids_tensor, mask_tensor])
            }
            .map_err(|e| inference_err("ONNX inference", e))?;

            // Encoders output either [1, seq_len, dim] token embeddings or
            // an already pooled [1, dim] sentence embedding.
            let (shape, data) = outputs[0]
                .try_extract_tensor::<f32>()
                .map_err(|e| inference_err("extracting output", e))?;
            let dims: Vec<i64> = shape.iter().copied().collect();

            match dims.len() {
                3 => {
                    let dim = dims[2] as usize;
                    let mask_sum: f32 = attention_mask.iter().map(|&m| m as f32).sum();
                    if mask_sum < 1e-9 {
                        return Err(Error::Inference("empty attention mask".into()));
                    }
                    let mut pooled = Array1::<f32>::zeros(dim);
                    for (i, &m) in attention_mask.iter().enumerate() {
                        if m > 0 {
                            let offset = i * dim;
                            for d in 0..dim {
                                pooled[d] += data[offset + d];
                            }
                        }
                    }
                    Ok(pooled / mask_sum)
                }
                2 => {
                    let dim = dims[1] as usize;
                    Ok(Array1::from_vec(data[..dim].to_vec()))
                }
                _ => Err(Error::Inference(format!(
                    "unexpected output shape: {:?}",
                    dims
                ))),
            }
        }
    }

    impl EmbedderBackend for OnnxEmbedder {
        fn embed(&self, text: &str) -> Result<EmbeddingResult> {
            Ok(EmbeddingResult {
                embedding: self.infer(text)?,
                cached: false,
            })
        }

        fn dimension(&self) -> usize {
            self.dimension
        }

        fn model_id(&self) -> &str {
            &self.model_id
        }

        fn is_available(&self) -> bool {
            true
        }
    }

}

#[cfg(feature = "onnx")]
pub use inner::OnnxEmbedder;
