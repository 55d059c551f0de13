use super::linear::LinearPriceModel;
use super::model::ModelError;
use crate::config::ModelSettings;

/// Loads the model artefact, training and persisting a new one when it is
/// missing and `train_if_missing` is set.
pub fn load_or_train(settings: &ModelSettings) -> Result<LinearPriceModel, ModelError> {
    match LinearPriceModel::load(&settings.path) {
        Ok(model) => {
            tracing::info!(
                path = %settings.path.display(),
                version = %model.version,
                trained_at = %model.trained_at,
                "Loaded pre-trained model"
            );
            Ok(model)
        }
        Err(ModelError::NotFound(path)) if settings.train_if_missing => {
            tracing::warn!(
                path = %path.display(),
                samples = settings.training_samples,
                seed = settings.training_seed,
                "Pre-trained model not detected, commencing training"
            );
            let model =
                LinearPriceModel::train(settings.training_samples, settings.training_seed)?;
            model.save(&settings.path)?;

            // Read back what was written so serving always starts from the artefact on disk.
            let model = LinearPriceModel::load(&settings.path)?;
            tracing::info!(path = %settings.path.display(), "Trained and saved model");
            Ok(model)
        }
        Err(e) => Err(e),
    }
}
