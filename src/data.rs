use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::f::{hot_index, onehot};
use crate::Dataset;

/// One labeled example: an attribute vector and a one-hot class vector.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Instance {
    attributes: Vec<f64>,
    class_values: Vec<f64>,
}

impl Instance {
    pub fn new(attributes: Vec<f64>, class_values: Vec<f64>) -> Result<Instance> {
        if hot_index(&class_values).is_none() {
            return Err(Error::NotOneHot(class_values));
        }

        Ok(Instance {
            attributes,
            class_values,
        })
    }

    /// Panics if `class >= class_count`.
    pub fn labeled(attributes: Vec<f64>, class: usize, class_count: usize) -> Instance {
        assert!(
            class < class_count,
            "Class {} out of range for {} classes",
            class,
            class_count
        );

        Instance {
            attributes,
            class_values: onehot(class, class_count),
        }
    }

    pub fn attributes(&self) -> &[f64] {
        &self.attributes
    }

    pub fn class_values(&self) -> &[f64] {
        &self.class_values
    }

    pub fn label(&self) -> usize {
        hot_index(&self.class_values).unwrap_or(0)
    }
}

/// Checks that the set is non-empty and every instance matches the first one's dimensions.
/// Returns `(attribute_count, class_count)`.
pub fn dimensions(instances: &[Instance]) -> Result<(usize, usize)> {
    let first = instances.first().ok_or(Error::EmptyTrainingSet)?;
    let expected_attributes = first.attributes.len();
    let expected_classes = first.class_values.len();

    for (index, instance) in instances.iter().enumerate() {
        if instance.attributes.len() != expected_attributes
            || instance.class_values.len() != expected_classes
        {
            return Err(Error::InconsistentInstance {
                index,
                attributes: instance.attributes.len(),
                classes: instance.class_values.len(),
                expected_attributes,
                expected_classes,
            });
        }
    }

    Ok((expected_attributes, expected_classes))
}

/// Pairs up attribute rows with one-hot label rows.
pub fn from_xy((x, y): Dataset) -> Result<Vec<Instance>> {
    x.into_iter()
        .zip(y)
        .map(|(attributes, class_values)| Instance::new(attributes, class_values))
        .collect()
}

/// Reads a JSON array of instances. Labels are revalidated since the file
/// bypasses `Instance::new`.
pub fn read_dataset(path: &Path) -> Result<Vec<Instance>> {
    let serial = fs::read_to_string(path)?;
    let instances: Vec<Instance> = serde_json::from_str(&serial)?;

    for instance in instances.iter() {
        if hot_index(&instance.class_values).is_none() {
            return Err(Error::NotOneHot(instance.class_values.clone()));
        }
    }
    dimensions(&instances)?;

    Ok(instances)
}

pub fn write_dataset(path: &Path, instances: &[Instance]) -> Result<()> {
    let serial = serde_json::to_string(instances)?;
    fs::write(path, serial)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_soft_labels() {
        assert!(Instance::new(vec![1.], vec![0.5, 0.5]).is_err());
        assert!(Instance::new(vec![1.], vec![0., 0.]).is_err());

        let instance = Instance::new(vec![1., 2.], vec![0., 1., 0.]).unwrap();
        assert_eq!(instance.label(), 1);
        assert_eq!(instance.attributes(), &[1., 2.]);
    }

    #[test]
    fn labeled_builds_onehot() {
        let instance = Instance::labeled(vec![0.], 2, 3);
        assert_eq!(instance.class_values(), &[0., 0., 1.]);
    }

    #[test]
    fn dimensions_require_agreement() {
        assert!(matches!(dimensions(&[]), Err(Error::EmptyTrainingSet)));

        let set = vec![
            Instance::labeled(vec![0., 1.], 0, 2),
            Instance::labeled(vec![1., 1.], 1, 2),
        ];
        assert_eq!(dimensions(&set).unwrap(), (2, 2));

        let ragged = vec![
            Instance::labeled(vec![0., 1.], 0, 2),
            Instance::labeled(vec![1.], 1, 2),
        ];
        assert!(matches!(
            dimensions(&ragged),
            Err(Error::InconsistentInstance { index: 1, .. })
        ));
    }

    #[test]
    fn from_xy_pairs_rows() {
        let set = from_xy((vec![vec![0.], vec![1.]], vec![vec![1., 0.], vec![0., 1.]])).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set[1].label(), 1);
    }

    #[test]
    fn dataset_file_roundtrip() {
        let dir = std::env::temp_dir().join("shallow_test_dataset");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("set.json");

        let set = vec![
            Instance::labeled(vec![0.25, 1.], 0, 2),
            Instance::labeled(vec![1., 0.5], 1, 2),
        ];
        write_dataset(&path, &set).unwrap();
        assert_eq!(read_dataset(&path).unwrap(), set);

        fs::write(&path, r#"[{"attributes":[1.0],"class_values":[1.0,1.0]}]"#).unwrap();
        assert!(matches!(read_dataset(&path), Err(Error::NotOneHot(_))));

        let _ = fs::remove_dir_all(&dir);
    }
}
