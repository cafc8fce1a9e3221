//! Scene validation
//!
//! Bodies built from scene data must satisfy the kernel's preconditions
//! (positive mass, positive size, at least a triangle). The
//! [`SceneValidator`] reports every violation before anything is
//! instantiated.

use std::collections::HashSet;

use super::{BodyTemplate, Scene, ShapeTemplate};

/// Validation error found in a scene
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Scene has no bodies
    EmptyScene,
    /// Duplicate body name found
    DuplicateName(String),
    /// Mass is zero or negative
    NonPositiveMass { body: String, mass: f32 },
    /// Radius or circumradius is zero or negative
    NonPositiveSize { body: String, size: f32 },
    /// Polygon with fewer than three vertices
    TooFewVertices { body: String, vertices: u32 },
    /// Circle with no outline segments
    ZeroSegments { body: String },
    /// A position, velocity, mass, charge or size is NaN or infinite
    NonFinite { body: String },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyScene => write!(f, "Scene has no bodies"),
            ValidationError::DuplicateName(name) => {
                write!(f, "Duplicate body name: '{}'", name)
            }
            ValidationError::NonPositiveMass { body, mass } => {
                write!(f, "Body {} has non-positive mass {}", body, mass)
            }
            ValidationError::NonPositiveSize { body, size } => {
                write!(f, "Body {} has non-positive size {}", body, size)
            }
            ValidationError::TooFewVertices { body, vertices } => {
                write!(f, "Body {} is a polygon with {} vertices (need 3)", body, vertices)
            }
            ValidationError::ZeroSegments { body } => {
                write!(f, "Body {} is a circle with zero segments", body)
            }
            ValidationError::NonFinite { body } => {
                write!(f, "Body {} has a non-finite value", body)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Scene validator that checks body templates against kernel preconditions
///
/// # Example
/// ```ignore
/// let errors = SceneValidator::validate(&scene);
/// for error in &errors {
///     log::error!("{}", error);
/// }
/// ```
pub struct SceneValidator;

impl SceneValidator {
    /// Validate a scene, returning all errors found
    ///
    /// Returns an empty vector if no validation errors are detected.
    pub fn validate(scene: &Scene) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if scene.bodies.is_empty() {
            errors.push(ValidationError::EmptyScene);
        }

        let mut seen_names = HashSet::new();
        for (index, template) in scene.bodies.iter().enumerate() {
            if let Some(ref name) = template.name {
                if !seen_names.insert(name.clone()) {
                    errors.push(ValidationError::DuplicateName(name.clone()));
                }
            }
            Self::validate_body(index, template, &mut errors);
        }

        errors
    }

    /// Validate and return Result (Ok if no errors, Err with all errors)
    pub fn validate_or_error(scene: &Scene) -> Result<(), Vec<ValidationError>> {
        let errors = Self::validate(scene);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_body(index: usize, template: &BodyTemplate, errors: &mut Vec<ValidationError>) {
        let body = match template.name {
            Some(ref name) => format!("'{}'", name),
            None => format!("#{}", index),
        };

        let size = match template.shape {
            ShapeTemplate::Circle { radius, .. } => radius,
            ShapeTemplate::Polygon { circumradius, .. } => circumradius,
        };

        let finite = template.position.is_finite()
            && template.velocity.is_finite()
            && template.mass.is_finite()
            && template.charge.is_finite()
            && size.is_finite();
        if !finite {
            errors.push(ValidationError::NonFinite { body });
            return;
        }

        if template.mass <= 0.0 {
            errors.push(ValidationError::NonPositiveMass {
                body: body.clone(),
                mass: template.mass,
            });
        }

        if size <= 0.0 {
            errors.push(ValidationError::NonPositiveSize {
                body: body.clone(),
                size,
            });
        }

        match template.shape {
            ShapeTemplate::Circle { segments: 0, .. } => {
                errors.push(ValidationError::ZeroSegments { body });
            }
            ShapeTemplate::Polygon { vertices, .. } if vertices < 3 => {
                errors.push(ValidationError::TooFewVertices { body, vertices });
            }
            _ => {}
        }
    }
}
